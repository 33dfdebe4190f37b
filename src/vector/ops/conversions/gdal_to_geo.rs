use std::convert::{TryFrom, TryInto};

use crate::errors::GdalError;
use crate::vector::geometry::{Coord, Geometry};
use crate::vector::geometry_type::BaseType;

fn coord(c: &Coord) -> geo_types::Coord<f64> {
    geo_types::Coord { x: c.x, y: c.y }
}

fn line_string(geo: &Geometry) -> geo_types::LineString<f64> {
    geo_types::LineString(geo.points().iter().map(coord).collect())
}

fn polygon(geo: &Geometry) -> geo_types::Polygon<f64> {
    let mut rings = geo.parts().iter().map(line_string);
    let exterior = rings.next().unwrap_or_else(|| geo_types::LineString(Vec::new()));
    geo_types::Polygon::new(exterior, rings.collect())
}

/// Converts linear geometries. Curve types have no counterpart in
/// `geo_types` and must be linearized first. Z and M ordinates are dropped.
impl TryFrom<&Geometry> for geo_types::Geometry<f64> {
    type Error = GdalError;

    fn try_from(geo: &Geometry) -> Result<geo_types::Geometry<f64>, Self::Error> {
        let geometry_type = geo.geometry_type();
        let converted = match geometry_type.base() {
            BaseType::Point => match geo.points().first() {
                Some(c) => geo_types::Geometry::Point(geo_types::Point(coord(c))),
                None => geo_types::Geometry::MultiPoint(geo_types::MultiPoint(Vec::new())),
            },
            BaseType::MultiPoint => geo_types::Geometry::MultiPoint(geo_types::MultiPoint(
                geo.parts()
                    .iter()
                    .filter_map(|p| p.points().first())
                    .map(|c| geo_types::Point(coord(c)))
                    .collect(),
            )),
            BaseType::LineString => geo_types::Geometry::LineString(line_string(geo)),
            BaseType::MultiLineString => geo_types::Geometry::MultiLineString(
                geo_types::MultiLineString(geo.parts().iter().map(line_string).collect()),
            ),
            BaseType::Polygon => geo_types::Geometry::Polygon(polygon(geo)),
            BaseType::Triangle => {
                let ring = geo.get_geometry(0).map(Geometry::points).unwrap_or(&[]);
                match ring {
                    [a, b, c, _] => geo_types::Geometry::Triangle(geo_types::Triangle(
                        coord(a),
                        coord(b),
                        coord(c),
                    )),
                    _ => geo_types::Geometry::Polygon(polygon(geo)),
                }
            }
            BaseType::MultiPolygon | BaseType::PolyhedralSurface | BaseType::Tin => {
                geo_types::Geometry::MultiPolygon(geo_types::MultiPolygon(
                    geo.parts().iter().map(polygon).collect(),
                ))
            }
            BaseType::GeometryCollection => {
                let items = geo
                    .parts()
                    .iter()
                    .map(|item| item.try_into())
                    .collect::<Result<Vec<geo_types::Geometry<f64>>, _>>()?;
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(items))
            }
            _ => return Err(GdalError::UnsupportedGeometryType(geometry_type)),
        };
        Ok(converted)
    }
}

impl TryFrom<Geometry> for geo_types::Geometry<f64> {
    type Error = GdalError;

    fn try_from(geo: Geometry) -> Result<geo_types::Geometry<f64>, Self::Error> {
        geo_types::Geometry::try_from(&geo)
    }
}
