mod conversions;
mod curves;
mod force;

pub use curves::DEFAULT_MAX_ANGLE_STEP_DEGREES;
