use std::sync::Arc;

use crate::spatial_ref::SpatialRef;
use crate::vector::{
    Dataset, Defn, Feature, FieldDefn, FieldType, FieldValue, GeomFieldDefn, Geometry,
    GeometryType, MemLayer,
};

/// Builds a feature for `defn` with a name, an id and one WKT per geometry
/// field (`None` for a null geometry).
pub fn feature(defn: &Arc<Defn>, name: &str, geometries: &[Option<&str>]) -> Feature {
    let mut feature = Feature::new(Arc::clone(defn));
    feature
        .set_field("name", &FieldValue::StringValue(name.to_string()))
        .unwrap();
    if defn.field_index("id").is_ok() {
        let id = name.len() as i32;
        feature
            .set_field("id", &FieldValue::IntegerValue(id))
            .unwrap();
    }
    for (idx, wkt) in geometries.iter().enumerate() {
        let geom = wkt.map(|wkt| Geometry::from_wkt(wkt).unwrap());
        feature.set_geometry_by_index(idx, geom).unwrap();
    }
    feature
}

/// Layer "mixed": a geometry field "geom" declared as generic geometry in
/// EPSG:4326, holding a point, a line string, a polygon, a multipolygon made
/// of two disjoint parts and a null geometry, with FIDs 0 to 4.
pub fn mixed_layer() -> MemLayer {
    let mut defn = Defn::new("mixed");
    defn.add_field(FieldDefn::new("name", FieldType::String));
    defn.add_field(FieldDefn::new("id", FieldType::Integer));
    defn.add_geom_field(
        GeomFieldDefn::new("geom", GeometryType::UNKNOWN)
            .with_spatial_ref(SpatialRef::from_epsg(4326)),
    );
    let defn = Arc::new(defn);
    let mut layer = MemLayer::new(Arc::clone(&defn));
    for (name, wkt) in [
        ("point", Some("POINT (1 2)")),
        ("line", Some("LINESTRING (0 0,1 1)")),
        ("polygon", Some("POLYGON ((0 0,1 0,1 1,0 0))")),
        (
            "multi",
            Some("MULTIPOLYGON (((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))"),
        ),
        ("nothing", None),
    ] {
        layer.create_feature(feature(&defn, name, &[wkt])).unwrap();
    }
    layer
}

/// Layer "two_geoms" with geometry fields "geom1" (points, EPSG:4326) and
/// "geom2" (line strings, EPSG:3857).
pub fn two_geometry_layer() -> MemLayer {
    let mut defn = Defn::new("two_geoms");
    defn.add_field(FieldDefn::new("name", FieldType::String));
    defn.add_geom_field(
        GeomFieldDefn::new("geom1", GeometryType::POINT)
            .with_spatial_ref(SpatialRef::from_epsg(4326)),
    );
    defn.add_geom_field(
        GeomFieldDefn::new("geom2", GeometryType::LINE_STRING)
            .with_spatial_ref(SpatialRef::from_epsg(3857)),
    );
    let defn = Arc::new(defn);
    let mut layer = MemLayer::new(Arc::clone(&defn));
    layer
        .create_feature(feature(
            &defn,
            "first",
            &[Some("POINT (1 2)"), Some("LINESTRING (0 0,1 1)")],
        ))
        .unwrap();
    layer
        .create_feature(feature(&defn, "second", &[Some("POINT (3 4)"), None]))
        .unwrap();
    layer
}

/// Dataset holding [`mixed_layer`] and [`two_geometry_layer`], in that order.
pub fn fixture_dataset() -> Dataset {
    let mut dataset = Dataset::new("memory");
    dataset.add_layer(mixed_layer());
    dataset.add_layer(two_geometry_layer());
    dataset
}
