use std::fmt::{self, Display, Formatter};

use crate::errors::{GdalError, Result};
use crate::spatial_ref::SpatialRef;
use crate::vector::geometry_type::{BaseType, Dimensions, GeometryType};

/// A vertex. `z` and `m` are meaningful only when the owning geometry's type
/// carries the matching dimension, and are zero otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Coord {
    pub fn xy(x: f64, y: f64) -> Coord {
        Coord {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Coord {
        Coord {
            x,
            y,
            z,
            ..Default::default()
        }
    }

    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Coord {
        Coord { x, y, z, m }
    }

    fn same_xy(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Axis aligned bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Envelope {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Envelope {
        Envelope {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    fn of_coord(c: &Coord) -> Envelope {
        Envelope::new(c.x, c.y, c.x, c.y)
    }

    pub fn merge(&mut self, other: &Envelope) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// An owned geometry.
///
/// Points, line strings and circular strings hold their vertices directly.
/// Every other type holds sub-geometries: rings for polygons and triangles
/// (stored as line strings), curve segments for compound curves, rings of any
/// curve type for curve polygons, and members for collections, polyhedral
/// surfaces and TINs. Sub-geometries share the dimensions of their parent and
/// never carry a spatial reference of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    geometry_type: GeometryType,
    points: Vec<Coord>,
    parts: Vec<Geometry>,
    spatial_ref: Option<SpatialRef>,
}

impl Geometry {
    /// Creates an empty geometry of the given type.
    pub fn empty(geometry_type: GeometryType) -> Geometry {
        Geometry {
            geometry_type,
            points: Vec::new(),
            parts: Vec::new(),
            spatial_ref: None,
        }
    }

    pub fn point(coord: Coord, dims: Dimensions) -> Geometry {
        let mut geom = Geometry::empty(GeometryType::new(BaseType::Point, dims));
        geom.points.push(coord);
        geom
    }

    /// Creates a vertex-holding geometry (point, line string or circular
    /// string) from its vertices.
    pub fn with_points(geometry_type: GeometryType, points: Vec<Coord>) -> Result<Geometry> {
        if !holds_points(geometry_type.base()) {
            return Err(GdalError::BadArgument(format!(
                "{geometry_type} does not hold vertices directly"
            )));
        }
        if geometry_type.base() == BaseType::Point && points.len() > 1 {
            return Err(GdalError::BadArgument(
                "a point holds at most one vertex".to_string(),
            ));
        }
        Ok(Geometry {
            points,
            ..Geometry::empty(geometry_type)
        })
    }

    pub(crate) fn from_parts_unchecked(
        geometry_type: GeometryType,
        parts: Vec<Geometry>,
    ) -> Geometry {
        Geometry {
            parts,
            ..Geometry::empty(geometry_type)
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub(crate) fn set_base_type(&mut self, base: BaseType) {
        self.geometry_type = self.geometry_type.with_base(base);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.parts.iter().all(Geometry::is_empty)
    }

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn geometry_count(&self) -> usize {
        self.parts.len()
    }

    pub fn get_geometry(&self, index: usize) -> Option<&Geometry> {
        self.parts.get(index)
    }

    pub fn parts(&self) -> &[Geometry] {
        &self.parts
    }

    pub(crate) fn into_parts(self) -> Vec<Geometry> {
        self.parts
    }

    /// Appends a sub-geometry, after checking that this type may contain it.
    pub fn add_geometry(&mut self, mut sub: Geometry) -> Result<()> {
        if !accepts_child(self.geometry_type, sub.geometry_type) {
            return Err(GdalError::InvalidChildGeometry {
                parent: self.geometry_type,
                child: sub.geometry_type,
            });
        }
        sub.spatial_ref = None;
        sub.set_dimensions(self.geometry_type.dims());
        self.parts.push(sub);
        Ok(())
    }

    pub fn spatial_ref(&self) -> Option<&SpatialRef> {
        self.spatial_ref.as_ref()
    }

    /// Assigns a spatial reference without touching coordinates.
    pub fn set_spatial_ref(&mut self, spatial_ref: Option<SpatialRef>) {
        self.spatial_ref = spatial_ref;
    }

    /// Sets the dimensions of this geometry and all its parts. Ordinates that
    /// are dropped are reset to zero, added ones start at zero.
    pub fn set_dimensions(&mut self, dims: Dimensions) {
        self.geometry_type = self.geometry_type.with_dims(dims);
        for coord in &mut self.points {
            if !dims.contains(Dimensions::Z) {
                coord.z = 0.0;
            }
            if !dims.contains(Dimensions::M) {
                coord.m = 0.0;
            }
        }
        for part in &mut self.parts {
            part.set_dimensions(dims);
        }
    }

    pub fn set_3d(&mut self, is_3d: bool) {
        let mut dims = self.geometry_type.dims();
        dims.set(Dimensions::Z, is_3d);
        self.set_dimensions(dims);
    }

    pub fn set_measured(&mut self, is_measured: bool) {
        let mut dims = self.geometry_type.dims();
        dims.set(Dimensions::M, is_measured);
        self.set_dimensions(dims);
    }

    pub fn flatten_to_2d(&mut self) {
        self.set_dimensions(Dimensions::empty());
    }

    /// Whether the first and last vertex of a curve coincide in XY.
    pub fn is_closed(&self) -> bool {
        match self.geometry_type.base() {
            BaseType::LineString | BaseType::CircularString => {
                match (self.points.first(), self.points.last()) {
                    (Some(first), Some(last)) => first.same_xy(last),
                    _ => false,
                }
            }
            BaseType::CompoundCurve => {
                let first = self.parts.first().and_then(|p| p.points.first());
                let last = self.parts.last().and_then(|p| p.points.last());
                match (first, last) {
                    (Some(first), Some(last)) => first.same_xy(last),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Bounding rectangle of all vertices, `None` for empty geometries.
    ///
    /// Arcs are bounded by their control points.
    pub fn envelope(&self) -> Option<Envelope> {
        let mut env: Option<Envelope> = None;
        self.visit_coords(&mut |c| match env.as_mut() {
            Some(env) => env.merge(&Envelope::of_coord(c)),
            None => env = Some(Envelope::of_coord(c)),
        });
        env
    }

    fn visit_coords(&self, f: &mut dyn FnMut(&Coord)) {
        self.points.iter().for_each(&mut *f);
        for part in &self.parts {
            part.visit_coords(f);
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wkt())
    }
}

pub(crate) fn holds_points(base: BaseType) -> bool {
    matches!(
        base,
        BaseType::Point | BaseType::LineString | BaseType::CircularString
    )
}

pub(crate) fn accepts_child(parent: GeometryType, child: GeometryType) -> bool {
    use BaseType::*;

    let child = child.base();
    match parent.base() {
        Point | LineString | CircularString | Unknown | Curve | Surface => false,
        Polygon | Triangle => child == LineString,
        CompoundCurve => matches!(child, LineString | CircularString),
        CurvePolygon => matches!(child, LineString | CircularString | CompoundCurve),
        MultiPoint => child == Point,
        MultiLineString => child == LineString,
        MultiPolygon => child == Polygon,
        MultiCurve => GeometryType::flat(child).is_curve(),
        MultiSurface => matches!(child, Polygon | CurvePolygon | Triangle),
        PolyhedralSurface => child == Polygon,
        Tin => child == Triangle,
        GeometryCollection => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wkt_round_trip() {
        for wkt in [
            "POINT (1 2)",
            "POINT Z (1 2 3)",
            "POINT M (1 2 4)",
            "POINT ZM (1 2 3 4)",
            "POINT EMPTY",
            "LINESTRING (0 0,1 1,2 0.5)",
            "POLYGON ((0 0,1 0,1 1,0 0),(0.2 0.1,0.3 0.1,0.3 0.2,0.2 0.1))",
            "MULTIPOINT ((0 0),(1 1))",
            "MULTILINESTRING ((0 0,1 1),(2 2,3 3))",
            "MULTIPOLYGON (((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))",
            "GEOMETRYCOLLECTION (POINT (0 0),LINESTRING (0 0,1 1))",
            "CIRCULARSTRING (0 0,1 1,2 0)",
            "COMPOUNDCURVE ((0 0,1 1),CIRCULARSTRING (1 1,2 2,3 1))",
            "CURVEPOLYGON (CIRCULARSTRING (0 0,1 1,2 0,1 -1,0 0))",
            "MULTICURVE ((0 0,1 1),CIRCULARSTRING (0 0,1 1,2 0))",
            "MULTISURFACE (((0 0,1 0,1 1,0 0)),CURVEPOLYGON ((0 0,1 0,1 1,0 0)))",
            "TRIANGLE ((0 0,1 0,0 1,0 0))",
            "TIN (((0 0,1 0,0 1,0 0)),((1 0,1 1,0 1,1 0)))",
            "POLYHEDRALSURFACE Z (((0 0 0,1 0 0,1 1 0,0 0 0)))",
            "MULTIPOLYGON EMPTY",
        ] {
            assert_eq!(Geometry::from_wkt(wkt).unwrap().wkt(), wkt);
        }
    }

    #[test]
    fn test_untagged_dimensions_are_inferred() {
        let geom = Geometry::from_wkt("LINESTRING (0 0 1,1 1 2)").unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::LINE_STRING.set_z());
        assert_eq!(geom.points()[1], Coord::xyz(1.0, 1.0, 2.0));
        let geom = Geometry::from_wkt("POINT (0 0 1 2)").unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::POINT.set_z().set_m());
    }

    #[test]
    fn test_set_dimensions() {
        let mut geom = Geometry::from_wkt("MULTIPOINT ZM ((1 2 3 4))").unwrap();
        geom.set_measured(false);
        assert_eq!(geom.wkt(), "MULTIPOINT Z ((1 2 3))");
        geom.flatten_to_2d();
        assert_eq!(geom.wkt(), "MULTIPOINT ((1 2))");
        geom.set_3d(true);
        assert_eq!(geom.wkt(), "MULTIPOINT Z ((1 2 0))");
        assert_eq!(
            geom.get_geometry(0).unwrap().geometry_type(),
            GeometryType::POINT.set_z()
        );
    }

    #[test]
    fn test_add_geometry_checks_child_type() {
        let mut multi = Geometry::empty(GeometryType::MULTI_POLYGON);
        let line = Geometry::from_wkt("LINESTRING (0 0,1 1)").unwrap();
        assert_eq!(
            multi.add_geometry(line),
            Err(GdalError::InvalidChildGeometry {
                parent: GeometryType::MULTI_POLYGON,
                child: GeometryType::LINE_STRING,
            })
        );
        let polygon = Geometry::from_wkt("POLYGON ((0 0,1 0,1 1,0 0))").unwrap();
        multi.add_geometry(polygon).unwrap();
        assert_eq!(multi.geometry_count(), 1);
    }

    #[test]
    fn test_envelope() {
        let geom = Geometry::from_wkt("MULTILINESTRING ((0 0,1 5),(-2 3,4 -1))").unwrap();
        assert_eq!(geom.envelope(), Some(Envelope::new(-2.0, -1.0, 4.0, 5.0)));
        assert_eq!(Geometry::empty(GeometryType::POINT).envelope(), None);
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&Envelope::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.intersects(&Envelope::new(1.5, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn test_is_closed() {
        let ring = Geometry::from_wkt("LINESTRING (0 0,1 0,1 1,0 0)").unwrap();
        assert!(ring.is_closed());
        let curve =
            Geometry::from_wkt("COMPOUNDCURVE (CIRCULARSTRING (0 0,1 1,2 0),(2 0,0 0))").unwrap();
        assert!(curve.is_closed());
        let open = Geometry::from_wkt("LINESTRING (0 0,1 0)").unwrap();
        assert!(!open.is_closed());
    }
}
