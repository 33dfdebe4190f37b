use crate::vector::geometry::Geometry;
use crate::vector::geometry_type::{BaseType, GeometryType};
use crate::vector::ops::curves::DEFAULT_MAX_ANGLE_STEP_DEGREES;

/// # Type Coercion
impl Geometry {
    /// Tries to reshape this geometry into `target`.
    ///
    /// Conversions that preserve all vertices are always performed: wrapping
    /// a geometry into a collection, unwrapping a single-member collection,
    /// relabelling between polygons, triangles and curve polygons, turning a
    /// closed curve into a polygon ring and back, and promoting line strings
    /// to compound curves. Curves are stroked when a linear target is
    /// requested. The dimensions of the result are those of `target`, with
    /// missing ordinates set to zero.
    ///
    /// Returns `None` when the geometry cannot be represented as `target`,
    /// e.g. a multi polygon with several members forced to `POLYGON`.
    ///
    /// A `target` of plain `GEOMETRY` returns the geometry unchanged; the
    /// abstract `CURVE` and `SURFACE` targets keep geometries that already
    /// are curves or surfaces and otherwise aim for `COMPOUNDCURVE` and
    /// `CURVEPOLYGON`.
    pub fn force_to(self, target: GeometryType) -> Option<Geometry> {
        if target == GeometryType::UNKNOWN {
            return Some(self);
        }
        let mut geom = self;
        let spatial_ref = geom.spatial_ref().cloned();
        geom.set_spatial_ref(None);
        let mut forced = force_shape(geom, target.base())?;
        forced.set_dimensions(target.dims());
        forced.set_spatial_ref(spatial_ref);
        Some(forced)
    }
}

fn is_container(ty: GeometryType) -> bool {
    ty.is_collection() || matches!(ty.base(), BaseType::PolyhedralSurface | BaseType::Tin)
}

fn force_shape(geom: Geometry, target: BaseType) -> Option<Geometry> {
    let ty = geom.geometry_type();
    if ty.base() == target {
        return Some(geom);
    }
    if geom.is_empty()
        && !matches!(
            target,
            BaseType::Unknown | BaseType::Curve | BaseType::Surface
        )
    {
        return Some(Geometry::empty(ty.with_base(target)));
    }
    match target {
        BaseType::Unknown => Some(geom),
        BaseType::GeometryCollection => Some(if is_container(ty) {
            relabel(geom, target)
        } else {
            wrap(geom, target)
        }),
        BaseType::Curve => {
            if ty.is_curve() {
                Some(geom)
            } else {
                force_shape(geom, BaseType::CompoundCurve)
            }
        }
        BaseType::Surface => {
            if ty.is_surface() {
                Some(geom)
            } else {
                force_shape(geom, BaseType::CurvePolygon)
            }
        }
        BaseType::MultiPoint
        | BaseType::MultiLineString
        | BaseType::MultiPolygon
        | BaseType::MultiCurve
        | BaseType::MultiSurface
        | BaseType::PolyhedralSurface
        | BaseType::Tin => force_container(geom, target),
        _ if is_container(ty) => {
            let mut parts = geom.into_parts();
            if parts.len() == 1 {
                force_shape(parts.remove(0), target)
            } else {
                None
            }
        }
        _ => force_single(geom, target),
    }
}

/// Element type of the homogeneous containers.
fn member_type(container: BaseType) -> BaseType {
    match container {
        BaseType::MultiPoint => BaseType::Point,
        BaseType::MultiLineString => BaseType::LineString,
        BaseType::MultiPolygon | BaseType::PolyhedralSurface => BaseType::Polygon,
        BaseType::MultiCurve => BaseType::Curve,
        BaseType::MultiSurface => BaseType::Surface,
        BaseType::Tin => BaseType::Triangle,
        other => other,
    }
}

fn force_container(geom: Geometry, target: BaseType) -> Option<Geometry> {
    let member = member_type(target);
    let ty = geom.geometry_type();
    let members = if is_container(ty) {
        let mut leaves = Vec::new();
        flatten_members(geom, &mut leaves);
        leaves
            .into_iter()
            .map(|leaf| force_shape(leaf, member))
            .collect::<Option<Vec<_>>>()?
    } else {
        vec![force_shape(geom, member)?]
    };
    Some(Geometry::from_parts_unchecked(
        ty.with_base(target),
        members,
    ))
}

/// Collects the non-container members of nested containers.
fn flatten_members(geom: Geometry, out: &mut Vec<Geometry>) {
    for part in geom.into_parts() {
        if is_container(part.geometry_type()) {
            flatten_members(part, out);
        } else {
            out.push(part);
        }
    }
}

fn relabel(mut geom: Geometry, target: BaseType) -> Geometry {
    geom.set_base_type(target);
    geom
}

fn wrap(mut geom: Geometry, target: BaseType) -> Geometry {
    let ty = geom.geometry_type().with_base(target);
    geom.set_spatial_ref(None);
    Geometry::from_parts_unchecked(ty, vec![geom])
}

fn linear_step() -> f64 {
    DEFAULT_MAX_ANGLE_STEP_DEGREES.to_radians()
}

/// The single ring of a polygon-like geometry, if it has exactly one.
fn single_ring(geom: Geometry) -> Option<Geometry> {
    match geom.geometry_type().base() {
        BaseType::Polygon | BaseType::Triangle | BaseType::CurvePolygon => {
            let mut rings = geom.into_parts();
            if rings.len() == 1 {
                Some(rings.remove(0))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Converts between the non-container types.
fn force_single(geom: Geometry, target: BaseType) -> Option<Geometry> {
    let ty = geom.geometry_type();
    match target {
        BaseType::LineString => match ty.base() {
            BaseType::CircularString | BaseType::CompoundCurve => {
                let points = geom.linear_points(linear_step());
                Geometry::with_points(ty.with_base(BaseType::LineString), points).ok()
            }
            BaseType::Polygon | BaseType::Triangle | BaseType::CurvePolygon => {
                force_shape(single_ring(geom)?, BaseType::LineString)
            }
            _ => None,
        },
        BaseType::CircularString => match ty.base() {
            BaseType::CompoundCurve if geom.geometry_count() == 1 => {
                let section = geom.into_parts().remove(0);
                (section.geometry_type().base() == BaseType::CircularString).then_some(section)
            }
            BaseType::CurvePolygon => force_shape(single_ring(geom)?, BaseType::CircularString),
            _ => None,
        },
        BaseType::CompoundCurve => match ty.base() {
            BaseType::LineString | BaseType::CircularString => Some(wrap(geom, target)),
            BaseType::Polygon | BaseType::Triangle | BaseType::CurvePolygon => {
                force_shape(single_ring(geom)?, BaseType::CompoundCurve)
            }
            _ => None,
        },
        BaseType::Polygon => match ty.base() {
            BaseType::Triangle => Some(relabel(geom, target)),
            BaseType::CurvePolygon => {
                let rings = geom
                    .into_parts()
                    .into_iter()
                    .map(|ring| force_shape(ring, BaseType::LineString))
                    .collect::<Option<Vec<_>>>()?;
                Some(Geometry::from_parts_unchecked(ty.with_base(target), rings))
            }
            _ if ty.is_curve() && geom.is_closed() => {
                let ring = force_shape(geom, BaseType::LineString)?;
                Some(wrap(ring, target))
            }
            _ => None,
        },
        BaseType::CurvePolygon => match ty.base() {
            BaseType::Polygon | BaseType::Triangle => Some(relabel(geom, target)),
            _ if ty.is_curve() && geom.is_closed() => Some(wrap(geom, target)),
            _ => None,
        },
        BaseType::Triangle => {
            let polygon = force_shape(geom, BaseType::Polygon)?;
            let is_triangle = polygon.geometry_count() == 1
                && polygon
                    .get_geometry(0)
                    .is_some_and(|ring| ring.point_count() == 4 && ring.is_closed());
            is_triangle.then(|| relabel(polygon, target))
        }
        _ => None,
    }
}
