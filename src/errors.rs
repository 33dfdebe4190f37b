use thiserror::Error;

use crate::vector::GeometryType;

pub type Result<T> = std::result::Result<T, GdalError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GdalError {
    #[error("Bad argument: {0}")]
    BadArgument(String),
    #[error("Conflicting options: {options}")]
    ConflictingOptions { options: String },
    #[error("Invalid geometry type '{0}'")]
    InvalidGeometryType(String),
    #[error("Invalid field name error for name '{field_name}' in method {method_name}")]
    InvalidFieldName {
        field_name: String,
        method_name: &'static str,
    },
    #[error("Invalid field index error for index '{index}' in method {method_name}")]
    InvalidFieldIndex {
        index: usize,
        method_name: &'static str,
    },
    #[error("Unable to find layer with name '{0}'")]
    LayerNotFound(String),
    #[error("Invalid layer index {0}")]
    InvalidLayerIndex(usize),
    #[error("Feature layout does not match layer definition of '{layer}'")]
    FeatureDefnMismatch { layer: String },
    #[error("Cannot add a {child} to a {parent}")]
    InvalidChildGeometry {
        parent: GeometryType,
        child: GeometryType,
    },
    #[error("WKT parse error at token {position}: {msg}")]
    WktParse { position: usize, msg: String },
    #[error("Attribute filter error: {0}")]
    AttributeFilter(String),
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(GeometryType),
    #[error("Layer has no extent")]
    EmptyExtent,
}
