use std::f64::consts::PI;

use crate::vector::geometry::{Coord, Geometry};
use crate::vector::geometry_type::BaseType;

/// Default angular step used to stroke arcs, in degrees.
pub const DEFAULT_MAX_ANGLE_STEP_DEGREES: f64 = 4.0;

/// # Curve Conversions
///
/// These methods convert between curved and linear representations.
impl Geometry {
    /// Returns the linear version of this geometry, stroking circular arcs
    /// with at most `max_angle_step_degrees` between consecutive vertices.
    ///
    /// Curve types are replaced by their linear counterparts
    /// (`COMPOUNDCURVE` → `LINESTRING`, `CURVEPOLYGON` → `POLYGON`,
    /// `MULTICURVE` → `MULTILINESTRING`, `MULTISURFACE` → `MULTIPOLYGON`).
    /// Already linear geometries are returned unchanged.
    pub fn linearize(&self, max_angle_step_degrees: f64) -> Geometry {
        let step = max_angle_step_degrees.to_radians();
        let mut linear = self.linearize_inner(step);
        linear.set_spatial_ref(self.spatial_ref().cloned());
        linear
    }

    fn linearize_inner(&self, step: f64) -> Geometry {
        let ty = self.geometry_type();
        match ty.base() {
            BaseType::CircularString | BaseType::CompoundCurve => {
                let points = self.linear_points(step);
                Geometry::with_points(ty.with_base(BaseType::LineString), points)
                    .unwrap_or_else(|_| Geometry::empty(ty.with_base(BaseType::LineString)))
            }
            BaseType::CurvePolygon
            | BaseType::MultiCurve
            | BaseType::MultiSurface
            | BaseType::GeometryCollection => {
                let parts = self
                    .parts()
                    .iter()
                    .map(|part| part.linearize_inner(step))
                    .collect();
                Geometry::from_parts_unchecked(ty.linear(), parts)
            }
            _ => {
                let mut geom = self.clone();
                geom.set_spatial_ref(None);
                geom
            }
        }
    }

    /// Vertices of a curve after stroking arcs.
    pub(crate) fn linear_points(&self, step: f64) -> Vec<Coord> {
        match self.geometry_type().base() {
            BaseType::CircularString => stroke_circular_string(self.points(), step),
            BaseType::CompoundCurve => {
                let mut points: Vec<Coord> = Vec::new();
                for part in self.parts() {
                    let mut section = part.linear_points(step);
                    if let (Some(last), Some(first)) = (points.last(), section.first()) {
                        if last.x == first.x && last.y == first.y {
                            section.remove(0);
                        }
                    }
                    points.extend(section);
                }
                points
            }
            _ => self.points().to_vec(),
        }
    }

    /// Promotes linear types to their curve counterparts without changing
    /// vertices: line strings become single-section compound curves, polygons
    /// become curve polygons, and so on.
    pub fn to_curve_geometry(&self) -> Geometry {
        let ty = self.geometry_type();
        let mut curved = match ty.base() {
            BaseType::LineString => {
                let mut section = self.clone();
                section.set_spatial_ref(None);
                Geometry::from_parts_unchecked(ty.curve(), vec![section])
            }
            BaseType::Polygon | BaseType::Triangle => {
                Geometry::from_parts_unchecked(ty.curve(), self.parts().to_vec())
            }
            BaseType::MultiLineString | BaseType::MultiPolygon | BaseType::GeometryCollection => {
                let parts = self
                    .parts()
                    .iter()
                    .map(Geometry::to_curve_geometry)
                    .collect();
                Geometry::from_parts_unchecked(ty.curve(), parts)
            }
            _ => self.clone(),
        };
        curved.set_spatial_ref(self.spatial_ref().cloned());
        curved
    }

    /// Whether this geometry contains circular arcs or curve containers.
    pub fn has_curve_geometry(&self) -> bool {
        self.geometry_type().is_non_linear()
            || self.parts().iter().any(Geometry::has_curve_geometry)
    }
}

fn stroke_circular_string(points: &[Coord], step: f64) -> Vec<Coord> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut out = vec![*first];
    let mut i = 0;
    while i + 2 < points.len() {
        out.extend(stroke_arc(&points[i], &points[i + 1], &points[i + 2], step));
        i += 2;
    }
    // A dangling vertex after the last complete arc is kept as a straight
    // segment.
    out.extend(points.iter().skip(i + 1));
    out
}

/// Vertices along the arc `p0 p1 p2`, excluding `p0` and ending exactly at
/// `p2`. Z and M are interpolated along the sweep.
fn stroke_arc(p0: &Coord, p1: &Coord, p2: &Coord, step: f64) -> Vec<Coord> {
    let (center, radius, start, sweep) = if p0.x == p2.x && p0.y == p2.y {
        // Full circle: p1 is diametrically opposite p0.
        let center = ((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0);
        let radius = ((p0.x - center.0).powi(2) + (p0.y - center.1).powi(2)).sqrt();
        let start = (p0.y - center.1).atan2(p0.x - center.0);
        (center, radius, start, 2.0 * PI)
    } else {
        let d = 2.0 * (p0.x * (p1.y - p2.y) + p1.x * (p2.y - p0.y) + p2.x * (p0.y - p1.y));
        if d.abs() < 1e-12 {
            return vec![*p1, *p2];
        }
        let s0 = p0.x * p0.x + p0.y * p0.y;
        let s1 = p1.x * p1.x + p1.y * p1.y;
        let s2 = p2.x * p2.x + p2.y * p2.y;
        let cx = (s0 * (p1.y - p2.y) + s1 * (p2.y - p0.y) + s2 * (p0.y - p1.y)) / d;
        let cy = (s0 * (p2.x - p1.x) + s1 * (p0.x - p2.x) + s2 * (p1.x - p0.x)) / d;
        let radius = ((p0.x - cx).powi(2) + (p0.y - cy).powi(2)).sqrt();

        let a0 = (p0.y - cy).atan2(p0.x - cx);
        let mut a1 = (p1.y - cy).atan2(p1.x - cx);
        let mut a2 = (p2.y - cy).atan2(p2.x - cx);
        let counter_clockwise =
            (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x) > 0.0;
        if counter_clockwise {
            while a1 < a0 {
                a1 += 2.0 * PI;
            }
            while a2 < a1 {
                a2 += 2.0 * PI;
            }
        } else {
            while a1 > a0 {
                a1 -= 2.0 * PI;
            }
            while a2 > a1 {
                a2 -= 2.0 * PI;
            }
        }
        ((cx, cy), radius, a0, a2 - a0)
    };

    let segments = ((sweep.abs() / step).ceil() as usize).max(1);
    let mut out = Vec::with_capacity(segments);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        let angle = start + sweep * t;
        out.push(Coord {
            x: center.0 + radius * angle.cos(),
            y: center.1 + radius * angle.sin(),
            z: p0.z + (p2.z - p0.z) * t,
            m: p0.m + (p2.m - p0.m) * t,
        });
    }
    out.push(*p2);
    out
}
