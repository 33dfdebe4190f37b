//! Geometry type rewriting for OGR-style vector layers.
//!
//! The crate provides a small in-memory vector data model (datasets, layers,
//! features, geometries) shaped like the GDAL/OGR API, and the `set-type`
//! pipeline step that changes the geometry type of layers and features:
//! single/multi cardinality, linear/curve form and XY/XYZ/XYM/XYZM
//! dimensionality.
//!
//! ## Use
//!
//! ```
//! use ogr_set_type::programs::vector::{set_type, SetTypeOptions};
//! use ogr_set_type::vector::{
//!     Dataset, Defn, Feature, GeomFieldDefn, Geometry, GeometryType, LayerAccess, MemLayer,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> ogr_set_type::errors::Result<()> {
//! let mut defn = Defn::new("roads");
//! defn.add_geom_field(GeomFieldDefn::new("geom", GeometryType::LINE_STRING));
//! let defn = Arc::new(defn);
//!
//! let mut layer = MemLayer::new(Arc::clone(&defn));
//! let mut feature = Feature::new(defn);
//! feature.set_geometry(Geometry::from_wkt("LINESTRING (0 0,1 1)")?)?;
//! layer.create_feature(feature)?;
//!
//! let mut dataset = Dataset::new("memory");
//! dataset.add_layer(layer);
//!
//! let options = SetTypeOptions::new(["--multi", "--xyz"])?;
//! let mut output = set_type(dataset, &options)?;
//! let layer = output.layer(0)?;
//! assert_eq!(
//!     layer.defn().geometry_type(),
//!     Some(GeometryType::MULTI_LINE_STRING.set_z())
//! );
//! for feature in layer.features() {
//!     println!("{}", feature.geometry().unwrap().wkt());
//! }
//! # Ok(())
//! # }
//! ```

#![crate_name = "ogr_set_type"]
#![crate_type = "lib"]

pub mod errors;
pub mod metadata;
pub mod programs;
pub mod spatial_ref;
pub mod vector;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(test)]
fn assert_almost_eq(a: f64, b: f64) {
    let f: f64 = a / b;
    assert!(f < 1.00001);
    assert!(f > 0.99999);
}
