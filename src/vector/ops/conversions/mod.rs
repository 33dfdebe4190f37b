mod formats;
mod gdal_to_geo;
mod geo_to_gdal;

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use geo_types::{coord, line_string, point};

    use crate::errors::GdalError;
    use crate::vector::{Geometry, GeometryType, ToGdal};

    fn round_trip(wkt: &str, geo: geo_types::Geometry<f64>) {
        let converted = geo_types::Geometry::try_from(Geometry::from_wkt(wkt).unwrap()).unwrap();
        assert_eq!(converted, geo);
        assert_eq!(geo.to_gdal().unwrap().wkt(), wkt);
    }

    #[test]
    fn test_import_export_point() {
        round_trip(
            "POINT (1 2)",
            geo_types::Geometry::Point(point!(x: 1., y: 2.)),
        );
    }

    #[test]
    fn test_import_export_multilinestring() {
        let geo = geo_types::MultiLineString(vec![
            line_string![(x: 0., y: 0.), (x: 0., y: 1.), (x: 1., y: 2.)],
            line_string![(x: 3., y: 3.), (x: 3., y: 4.)],
        ]);
        round_trip(
            "MULTILINESTRING ((0 0,0 1,1 2),(3 3,3 4))",
            geo_types::Geometry::MultiLineString(geo),
        );
    }

    #[test]
    fn test_import_export_polygon_with_hole() {
        let geo = geo_types::Polygon::new(
            line_string![(x: 0., y: 0.), (x: 4., y: 0.), (x: 4., y: 4.), (x: 0., y: 0.)],
            vec![line_string![
                (x: 1., y: 1.),
                (x: 2., y: 1.),
                (x: 2., y: 2.),
                (x: 1., y: 1.)
            ]],
        );
        round_trip(
            "POLYGON ((0 0,4 0,4 4,0 0),(1 1,2 1,2 2,1 1))",
            geo_types::Geometry::Polygon(geo),
        );
    }

    #[test]
    fn test_import_export_collection() {
        let geo = geo_types::GeometryCollection(vec![
            geo_types::Geometry::Point(point!(x: 1., y: 2.)),
            geo_types::Geometry::LineString(line_string![(x: 0., y: 0.), (x: 1., y: 1.)]),
        ]);
        round_trip(
            "GEOMETRYCOLLECTION (POINT (1 2),LINESTRING (0 0,1 1))",
            geo_types::Geometry::GeometryCollection(geo),
        );
    }

    #[test]
    fn test_export_rect() {
        let rect = geo_types::Rect::new(
            coord! { x: 0., y: 0. },
            coord! { x: 1., y: 1. },
        );
        let geom = rect.to_gdal().unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::POLYGON);
        assert!(geom.get_geometry(0).unwrap().is_closed());
    }

    #[test]
    fn test_curves_are_rejected() {
        let curve = Geometry::from_wkt("CIRCULARSTRING (0 0,1 1,2 0)").unwrap();
        assert_eq!(
            geo_types::Geometry::try_from(&curve),
            Err(GdalError::UnsupportedGeometryType(
                GeometryType::CIRCULAR_STRING
            ))
        );
        let linear = curve.linearize(crate::vector::DEFAULT_MAX_ANGLE_STEP_DEGREES);
        assert!(geo_types::Geometry::try_from(&linear).is_ok());
    }

    #[test]
    fn test_measures_are_dropped() {
        let geom = Geometry::from_wkt("POINT ZM (1 2 3 4)").unwrap();
        assert_eq!(
            geo_types::Geometry::try_from(&geom).unwrap(),
            geo_types::Geometry::Point(point!(x: 1., y: 2.))
        );
    }
}
