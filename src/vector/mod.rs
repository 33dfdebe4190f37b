//! Vector Data
//!
//! An in-memory vector data model shaped like OGR: a [`Dataset`] owns layers
//! implementing [`LayerAccess`], layers produce [`Feature`]s laid out
//! according to a [`Defn`], and features hold attribute values and
//! [`Geometry`] values.
//!
//! ## Reading
//!
//! ```
//! use ogr_set_type::vector::{
//!     Defn, Feature, FieldDefn, FieldType, FieldValue, GeomFieldDefn, Geometry, GeometryType,
//!     LayerAccess, MemLayer,
//! };
//! use std::sync::Arc;
//!
//! let mut defn = Defn::new("roads");
//! defn.add_field(FieldDefn::new("highway", FieldType::String));
//! defn.add_geom_field(GeomFieldDefn::new("geom", GeometryType::LINE_STRING));
//! let defn = Arc::new(defn);
//!
//! let mut layer = MemLayer::new(Arc::clone(&defn));
//! let mut feature = Feature::new(defn);
//! feature.set_field("highway", &FieldValue::StringValue("primary".to_string())).unwrap();
//! feature.set_geometry(Geometry::from_wkt("LINESTRING (0 0,1 1)").unwrap()).unwrap();
//! layer.create_feature(feature).unwrap();
//!
//! for feature in layer.features() {
//!     let highway_field = feature.field("highway").unwrap().unwrap();
//!     let geometry = feature.geometry().unwrap();
//!     println!("{} {}", highway_field.into_string().unwrap(), geometry.wkt());
//! }
//! ```

pub use crate::vector::dataset::{BoxedLayer, Dataset};
pub use crate::vector::defn::{Defn, FieldDefn, FieldType, GeomFieldDefn};
pub use crate::vector::feature::{Feature, FieldValue};
pub use crate::vector::filter::{AttributeFilter, FeatureFilters};
pub use crate::vector::geometry::{Coord, Envelope, Geometry};
pub use crate::vector::geometry_type::{
    geometry_type_completions, BaseType, Dimensions, GeometryType,
};
pub use crate::vector::layer::{count_features_by_iteration, FeatureIterator, LayerAccess, LayerCaps};
pub use crate::vector::memory::MemLayer;
pub use crate::vector::ops::DEFAULT_MAX_ANGLE_STEP_DEGREES;

use crate::errors::Result;

/// Convert object to a GDAL geometry.
pub trait ToGdal {
    fn to_gdal(&self) -> Result<Geometry>;
}

mod dataset;
mod defn;
mod feature;
mod filter;
mod geometry;
mod geometry_type;
mod layer;
mod memory;
mod ops;

#[cfg(test)]
mod tests;
