use std::sync::Arc;

use crate::errors::GdalError;
use crate::spatial_ref::SpatialRef;
use crate::test_utils::{feature, fixture_dataset, mixed_layer, two_geometry_layer};
use crate::{assert_almost_eq, vector::Geometry};

use super::{
    count_features_by_iteration, Defn, Feature, FieldValue, GeometryType, LayerAccess,
    LayerCaps::*, MemLayer,
};

#[test]
fn test_layer_count() {
    let ds = fixture_dataset();
    assert_eq!(ds.layer_count(), 2);
    assert_eq!(ds.layer_names(), ["mixed", "two_geoms"]);
}

#[test]
fn test_get_layer_by_name() {
    let mut ds = fixture_dataset();
    assert_eq!(ds.layer_by_name("two_geoms").unwrap().name(), "two_geoms");
    assert_eq!(
        ds.layer_by_name("nope").err(),
        Some(GdalError::LayerNotFound("nope".to_string()))
    );
    assert!(matches!(
        ds.layer(2).err(),
        Some(GdalError::InvalidLayerIndex(2))
    ));
}

#[test]
fn test_layer_get_extent() {
    let mut layer = mixed_layer();
    let extent = layer.get_extent().unwrap();
    assert_eq!(extent.min_x, 0.0);
    assert_eq!(extent.min_y, 0.0);
    assert_almost_eq(extent.max_x, 6.0);
    assert_almost_eq(extent.max_y, 6.0);
}

#[test]
fn test_layer_try_get_extent_without_geometries() {
    let defn = Arc::new(Defn::new("empty"));
    let mut layer = MemLayer::new(defn);
    assert!(layer.try_get_extent(0, true).is_err());
    let mut layer = MemLayer::new(Arc::clone(two_geometry_layer().defn()));
    assert_eq!(layer.try_get_extent(1, true), Ok(None));
    assert_eq!(layer.get_extent(), Err(GdalError::EmptyExtent));
}

#[test]
fn test_layer_spatial_ref() {
    let layer = mixed_layer();
    assert_eq!(layer.spatial_ref(), Some(SpatialRef::from_epsg(4326)));
}

#[test]
fn test_layer_capabilities() {
    let mut layer = mixed_layer();
    assert!(!layer.has_capability(OLCFastSpatialFilter));
    assert!(layer.has_capability(OLCFastFeatureCount));
    assert!(layer.has_capability(OLCFastGetExtent));
    assert!(layer.has_capability(OLCRandomRead));
    assert!(layer.has_capability(OLCStringsAsUTF8));
    assert!(layer.has_capability(OLCCurveGeometries));
    assert!(!layer.has_capability(OLCTransactions));
    layer.set_attribute_filter("id > 4").unwrap();
    assert!(!layer.has_capability(OLCFastFeatureCount));
}

#[test]
fn test_capability_names() {
    assert_eq!(OLCRandomRead.as_str(), "RandomRead");
    assert_eq!(
        super::LayerCaps::from_name("fastfeaturecount"),
        Some(OLCFastFeatureCount)
    );
    assert_eq!(super::LayerCaps::from_name("Teleport"), None);
}

#[test]
fn test_feature_count() {
    let mut layer = mixed_layer();
    assert_eq!(layer.feature_count(), 5);
    assert_eq!(layer.try_feature_count(false), Some(5));
    assert_eq!(count_features_by_iteration(&mut layer), 5);
}

#[test]
fn test_feature() {
    let mut layer = mixed_layer();
    let feature = layer.feature(2).unwrap();
    assert_eq!(feature.fid(), Some(2));
    assert_eq!(
        feature.field("name").unwrap().and_then(FieldValue::into_string),
        Some("polygon".to_string())
    );
    assert!(layer.feature(42).is_none());
}

#[test]
fn test_iterate_features() {
    let mut layer = mixed_layer();
    let names: Vec<String> = layer
        .features()
        .filter_map(|f| f.field("name").unwrap().and_then(FieldValue::into_string))
        .collect();
    assert_eq!(names, ["point", "line", "polygon", "multi", "nothing"]);
}

#[test]
fn test_features_reset() {
    let mut layer = mixed_layer();
    assert_eq!(layer.features().count(), 5);
    assert_eq!(layer.features().count(), 5);
    assert!(layer.next_feature().is_none());
    layer.reset_reading();
    layer.next_feature();
    layer.next_feature();
    let mut rest = 0;
    while layer.next_feature().is_some() {
        rest += 1;
    }
    assert_eq!(rest, 3);
}

#[test]
fn test_fid() {
    let mut layer = mixed_layer();
    let fids: Vec<u64> = layer.features().filter_map(|f| f.fid()).collect();
    assert_eq!(fids, [0, 1, 2, 3, 4]);
}

#[test]
fn test_geom_fields() {
    let mut layer = two_geometry_layer();
    let names: Vec<&str> = layer.defn().geom_fields().map(|f| f.name()).collect();
    assert_eq!(names, ["geom1", "geom2"]);
    let feature = layer.feature(0).unwrap();
    assert_eq!(
        feature.geometry_by_name("geom2").unwrap().unwrap().wkt(),
        "LINESTRING (0 0,1 1)"
    );
    let second = layer.feature(1).unwrap();
    assert_eq!(second.geometry_by_index(1), Ok(None));
}

#[test]
fn test_set_attribute_filter() {
    let mut layer = mixed_layer();
    layer.set_attribute_filter("id = 5").unwrap();
    let names: Vec<String> = layer
        .features()
        .filter_map(|f| f.field("name").unwrap().and_then(FieldValue::into_string))
        .collect();
    assert_eq!(names, ["point", "multi"]);
    assert_eq!(layer.try_feature_count(false), None);
    assert_eq!(layer.feature_count(), 2);

    assert!(layer.set_attribute_filter("highway = 'primary'").is_err());
    layer.clear_attribute_filter();
    assert_eq!(layer.feature_count(), 5);
}

#[test]
fn test_spatial_filter() {
    let mut layer = mixed_layer();
    layer.set_spatial_filter_rect(4.0, 4.0, 10.0, 10.0);
    let names: Vec<String> = layer
        .features()
        .filter_map(|f| f.field("name").unwrap().and_then(FieldValue::into_string))
        .collect();
    assert_eq!(names, ["multi"]);
    // Random access ignores filters.
    assert!(layer.feature(0).is_some());
    layer.clear_spatial_filter();
    assert_eq!(layer.features().count(), 5);
}

#[test]
fn test_write_features() {
    let mut layer = mixed_layer();
    let defn = Arc::clone(layer.defn());
    let fid = layer
        .create_feature(feature(&defn, "extra", &[Some("POINT (9 9)")]))
        .unwrap();
    assert_eq!(fid, 5);

    let mut explicit = feature(&defn, "explicit", &[None]);
    explicit.set_fid(Some(10));
    assert_eq!(layer.create_feature(explicit.clone()), Ok(10));
    assert!(layer.create_feature(explicit).is_err());
    assert_eq!(
        layer
            .create_feature(feature(&defn, "after", &[None]))
            .unwrap(),
        11
    );

    let mut replaced = layer.feature(0).unwrap();
    replaced
        .set_geometry(Geometry::from_wkt("POINT (-1 -1)").unwrap())
        .unwrap();
    layer.set_feature(replaced).unwrap();
    assert_eq!(
        layer.feature(0).unwrap().geometry().unwrap().wkt(),
        "POINT (-1 -1)"
    );

    assert!(layer.delete_feature(1));
    assert!(!layer.delete_feature(1));
    assert_eq!(layer.feature_count(), 7);
}

#[test]
fn test_create_feature_checks_layout() {
    let mut layer = mixed_layer();
    let other = two_geometry_layer();
    let foreign = Feature::new(Arc::clone(other.defn()));
    assert_eq!(
        layer.create_feature(foreign),
        Err(GdalError::FeatureDefnMismatch {
            layer: "mixed".to_string()
        })
    );
}

#[test]
fn test_create_field() {
    let mut layer = mixed_layer();
    layer
        .create_field(super::FieldDefn::new("lanes", super::FieldType::Integer))
        .unwrap();
    assert_eq!(layer.defn().field_count(), 3);
    let feature = layer.feature(0).unwrap();
    assert_eq!(feature.field("lanes"), Ok(None));
    assert_eq!(
        feature.field("name").unwrap().and_then(FieldValue::into_string),
        Some("point".to_string())
    );
    assert!(Arc::ptr_eq(feature.defn(), layer.defn()));
}

#[test]
fn test_boxed_layers() {
    let mut ds = fixture_dataset();
    let layer = ds.layer(0).unwrap();
    assert_eq!(layer.defn().geometry_type(), Some(GeometryType::UNKNOWN));
    assert_eq!(layer.features().count(), 5);
    assert!(layer.has_capability(OLCRandomRead));
}
