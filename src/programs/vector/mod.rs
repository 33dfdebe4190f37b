mod passthrough;
pub mod set_type;

pub use passthrough::PassthroughLayer;
pub use set_type::{set_type, SetTypeLayer, SetTypeOptions};
