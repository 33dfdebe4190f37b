//! Pipeline steps operating on whole datasets.

pub mod vector;
