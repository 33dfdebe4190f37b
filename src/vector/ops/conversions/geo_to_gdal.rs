use crate::errors::Result;
use crate::vector::geometry::{Coord, Geometry};
use crate::vector::geometry_type::GeometryType;
use crate::vector::ToGdal;

fn coord(c: &geo_types::Coord<f64>) -> Coord {
    Coord::xy(c.x, c.y)
}

fn geometry_with_points(
    geometry_type: GeometryType,
    line: &geo_types::LineString<f64>,
) -> Result<Geometry> {
    Geometry::with_points(geometry_type, line.0.iter().map(coord).collect())
}

fn polygon_rings(
    geometry_type: GeometryType,
    exterior: &geo_types::LineString<f64>,
    interiors: &[geo_types::LineString<f64>],
) -> Result<Geometry> {
    let mut geom = Geometry::empty(geometry_type);
    if exterior.0.is_empty() {
        return Ok(geom);
    }
    geom.add_geometry(geometry_with_points(GeometryType::LINE_STRING, exterior)?)?;
    for ring in interiors {
        geom.add_geometry(geometry_with_points(GeometryType::LINE_STRING, ring)?)?;
    }
    Ok(geom)
}

impl ToGdal for geo_types::Point<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        Ok(Geometry::point(coord(&self.0), Default::default()))
    }
}

impl ToGdal for geo_types::MultiPoint<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        let mut geom = Geometry::empty(GeometryType::MULTI_POINT);
        for point in &self.0 {
            geom.add_geometry(point.to_gdal()?)?;
        }
        Ok(geom)
    }
}

impl ToGdal for geo_types::Line<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        Geometry::with_points(
            GeometryType::LINE_STRING,
            vec![coord(&self.start), coord(&self.end)],
        )
    }
}

impl ToGdal for geo_types::LineString<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        geometry_with_points(GeometryType::LINE_STRING, self)
    }
}

impl ToGdal for geo_types::MultiLineString<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        let mut geom = Geometry::empty(GeometryType::MULTI_LINE_STRING);
        for line in &self.0 {
            geom.add_geometry(line.to_gdal()?)?;
        }
        Ok(geom)
    }
}

impl ToGdal for geo_types::Polygon<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        polygon_rings(GeometryType::POLYGON, self.exterior(), self.interiors())
    }
}

impl ToGdal for geo_types::Rect<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        self.to_polygon().to_gdal()
    }
}

impl ToGdal for geo_types::Triangle<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        let polygon = self.to_polygon();
        polygon_rings(GeometryType::TRIANGLE, polygon.exterior(), &[])
    }
}

impl ToGdal for geo_types::MultiPolygon<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        let mut geom = Geometry::empty(GeometryType::MULTI_POLYGON);
        for polygon in &self.0 {
            geom.add_geometry(polygon.to_gdal()?)?;
        }
        Ok(geom)
    }
}

impl ToGdal for geo_types::GeometryCollection<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        let mut geom = Geometry::empty(GeometryType::GEOMETRY_COLLECTION);
        for item in &self.0 {
            geom.add_geometry(item.to_gdal()?)?;
        }
        Ok(geom)
    }
}

impl ToGdal for geo_types::Geometry<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        match self {
            geo_types::Geometry::Point(c) => c.to_gdal(),
            geo_types::Geometry::Line(c) => c.to_gdal(),
            geo_types::Geometry::LineString(c) => c.to_gdal(),
            geo_types::Geometry::Polygon(c) => c.to_gdal(),
            geo_types::Geometry::MultiPoint(c) => c.to_gdal(),
            geo_types::Geometry::MultiLineString(c) => c.to_gdal(),
            geo_types::Geometry::MultiPolygon(c) => c.to_gdal(),
            geo_types::Geometry::GeometryCollection(c) => c.to_gdal(),
            geo_types::Geometry::Rect(c) => c.to_gdal(),
            geo_types::Geometry::Triangle(c) => c.to_gdal(),
        }
    }
}
