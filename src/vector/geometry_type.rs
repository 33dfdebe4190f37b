use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use bitflags::bitflags;

use crate::errors::{GdalError, Result};

bitflags! {
    /// Optional ordinates carried by a geometry in addition to X and Y.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Dimensions: u8 {
        /// Elevation.
        const Z = 0x01;
        /// Measure.
        const M = 0x02;
    }
}

/// The shape of a geometry type, without its dimensionality.
///
/// Variants follow the ISO SQL/MM simple feature hierarchy, with `Unknown`
/// standing for the generic `GEOMETRY` type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseType {
    Unknown,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    CircularString,
    CompoundCurve,
    CurvePolygon,
    MultiCurve,
    MultiSurface,
    Curve,
    Surface,
    PolyhedralSurface,
    Tin,
    Triangle,
}

impl BaseType {
    pub const ALL: [BaseType; 18] = [
        BaseType::Unknown,
        BaseType::Point,
        BaseType::LineString,
        BaseType::Polygon,
        BaseType::MultiPoint,
        BaseType::MultiLineString,
        BaseType::MultiPolygon,
        BaseType::GeometryCollection,
        BaseType::CircularString,
        BaseType::CompoundCurve,
        BaseType::CurvePolygon,
        BaseType::MultiCurve,
        BaseType::MultiSurface,
        BaseType::Curve,
        BaseType::Surface,
        BaseType::PolyhedralSurface,
        BaseType::Tin,
        BaseType::Triangle,
    ];

    /// The OGC keyword for this shape, as used in WKT.
    pub fn ogc_name(self) -> &'static str {
        match self {
            BaseType::Unknown => "GEOMETRY",
            BaseType::Point => "POINT",
            BaseType::LineString => "LINESTRING",
            BaseType::Polygon => "POLYGON",
            BaseType::MultiPoint => "MULTIPOINT",
            BaseType::MultiLineString => "MULTILINESTRING",
            BaseType::MultiPolygon => "MULTIPOLYGON",
            BaseType::GeometryCollection => "GEOMETRYCOLLECTION",
            BaseType::CircularString => "CIRCULARSTRING",
            BaseType::CompoundCurve => "COMPOUNDCURVE",
            BaseType::CurvePolygon => "CURVEPOLYGON",
            BaseType::MultiCurve => "MULTICURVE",
            BaseType::MultiSurface => "MULTISURFACE",
            BaseType::Curve => "CURVE",
            BaseType::Surface => "SURFACE",
            BaseType::PolyhedralSurface => "POLYHEDRALSURFACE",
            BaseType::Tin => "TIN",
            BaseType::Triangle => "TRIANGLE",
        }
    }

    /// Case-insensitive lookup of an OGC keyword.
    pub fn from_ogc_name(name: &str) -> Option<BaseType> {
        BaseType::ALL
            .into_iter()
            .find(|base| base.ogc_name().eq_ignore_ascii_case(name))
    }

    /// ISO WKB code of the 2D type.
    pub fn iso_code(self) -> u32 {
        match self {
            BaseType::Unknown => 0,
            BaseType::Point => 1,
            BaseType::LineString => 2,
            BaseType::Polygon => 3,
            BaseType::MultiPoint => 4,
            BaseType::MultiLineString => 5,
            BaseType::MultiPolygon => 6,
            BaseType::GeometryCollection => 7,
            BaseType::CircularString => 8,
            BaseType::CompoundCurve => 9,
            BaseType::CurvePolygon => 10,
            BaseType::MultiCurve => 11,
            BaseType::MultiSurface => 12,
            BaseType::Curve => 13,
            BaseType::Surface => 14,
            BaseType::PolyhedralSurface => 15,
            BaseType::Tin => 16,
            BaseType::Triangle => 17,
        }
    }
}

/// A geometry type: a [`BaseType`] plus its [`Dimensions`].
///
/// The methods mirror the `OGR_GT_*` type algebra. None of them touch the
/// dimension bits unless their name says so.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryType {
    base: BaseType,
    dims: Dimensions,
}

impl GeometryType {
    pub const UNKNOWN: GeometryType = GeometryType::flat(BaseType::Unknown);
    pub const POINT: GeometryType = GeometryType::flat(BaseType::Point);
    pub const LINE_STRING: GeometryType = GeometryType::flat(BaseType::LineString);
    pub const POLYGON: GeometryType = GeometryType::flat(BaseType::Polygon);
    pub const MULTI_POINT: GeometryType = GeometryType::flat(BaseType::MultiPoint);
    pub const MULTI_LINE_STRING: GeometryType = GeometryType::flat(BaseType::MultiLineString);
    pub const MULTI_POLYGON: GeometryType = GeometryType::flat(BaseType::MultiPolygon);
    pub const GEOMETRY_COLLECTION: GeometryType =
        GeometryType::flat(BaseType::GeometryCollection);
    pub const CIRCULAR_STRING: GeometryType = GeometryType::flat(BaseType::CircularString);
    pub const COMPOUND_CURVE: GeometryType = GeometryType::flat(BaseType::CompoundCurve);
    pub const CURVE_POLYGON: GeometryType = GeometryType::flat(BaseType::CurvePolygon);
    pub const MULTI_CURVE: GeometryType = GeometryType::flat(BaseType::MultiCurve);
    pub const MULTI_SURFACE: GeometryType = GeometryType::flat(BaseType::MultiSurface);
    pub const CURVE: GeometryType = GeometryType::flat(BaseType::Curve);
    pub const SURFACE: GeometryType = GeometryType::flat(BaseType::Surface);
    pub const POLYHEDRAL_SURFACE: GeometryType = GeometryType::flat(BaseType::PolyhedralSurface);
    pub const TIN: GeometryType = GeometryType::flat(BaseType::Tin);
    pub const TRIANGLE: GeometryType = GeometryType::flat(BaseType::Triangle);

    pub const fn new(base: BaseType, dims: Dimensions) -> GeometryType {
        GeometryType { base, dims }
    }

    pub const fn flat(base: BaseType) -> GeometryType {
        GeometryType {
            base,
            dims: Dimensions::empty(),
        }
    }

    pub fn base(self) -> BaseType {
        self.base
    }

    pub fn dims(self) -> Dimensions {
        self.dims
    }

    pub fn has_z(self) -> bool {
        self.dims.contains(Dimensions::Z)
    }

    pub fn has_m(self) -> bool {
        self.dims.contains(Dimensions::M)
    }

    /// Number of ordinates per vertex, 2 to 4.
    pub fn coordinate_dimension(self) -> usize {
        2 + usize::from(self.has_z()) + usize::from(self.has_m())
    }

    /// Drops the Z and M bits.
    pub fn flatten(self) -> GeometryType {
        GeometryType::flat(self.base)
    }

    pub fn set_z(self) -> GeometryType {
        self.with_dims(self.dims | Dimensions::Z)
    }

    pub fn set_m(self) -> GeometryType {
        self.with_dims(self.dims | Dimensions::M)
    }

    pub fn with_dims(self, dims: Dimensions) -> GeometryType {
        GeometryType::new(self.base, dims)
    }

    pub fn with_base(self, base: BaseType) -> GeometryType {
        GeometryType::new(base, self.dims)
    }

    /// Whether `self` is `other` or one of its subtypes, ignoring dimensions.
    ///
    /// Every type is a subclass of the generic `GEOMETRY` type.
    pub fn is_subclass_of(self, other: GeometryType) -> bool {
        use BaseType::*;

        let (sub, sup) = (self.base, other.base);
        if sub == sup || sup == Unknown {
            return true;
        }
        match sup {
            GeometryCollection => matches!(
                sub,
                MultiPoint | MultiLineString | MultiPolygon | MultiCurve | MultiSurface
            ),
            CurvePolygon => matches!(sub, Polygon | Triangle),
            MultiCurve => sub == MultiLineString,
            MultiSurface => sub == MultiPolygon,
            Curve => matches!(sub, LineString | CircularString | CompoundCurve),
            Surface => matches!(
                sub,
                CurvePolygon | Polygon | Triangle | PolyhedralSurface | Tin
            ),
            Polygon => sub == Triangle,
            PolyhedralSurface => sub == Tin,
            _ => false,
        }
    }

    pub fn is_curve(self) -> bool {
        self.is_subclass_of(GeometryType::CURVE)
    }

    pub fn is_surface(self) -> bool {
        self.is_subclass_of(GeometryType::SURFACE)
    }

    /// Whether geometries of this type hold sub-geometries of a collection.
    pub fn is_collection(self) -> bool {
        self.base != BaseType::Unknown && self.is_subclass_of(GeometryType::GEOMETRY_COLLECTION)
    }

    /// Whether this type can only be represented with circular arcs.
    pub fn is_non_linear(self) -> bool {
        matches!(
            self.base,
            BaseType::CircularString
                | BaseType::CompoundCurve
                | BaseType::CurvePolygon
                | BaseType::MultiCurve
                | BaseType::MultiSurface
                | BaseType::Curve
                | BaseType::Surface
        )
    }

    /// The collection type gathering geometries of this type.
    ///
    /// Types without a natural collection (including the collections
    /// themselves) map to `GEOMETRY`.
    pub fn collection(self) -> GeometryType {
        let base = match self.base {
            BaseType::Point => BaseType::MultiPoint,
            BaseType::LineString => BaseType::MultiLineString,
            BaseType::Polygon => BaseType::MultiPolygon,
            BaseType::Triangle => BaseType::Tin,
            _ if self.is_curve() => BaseType::MultiCurve,
            _ if self.is_surface() => BaseType::MultiSurface,
            _ => BaseType::Unknown,
        };
        self.with_base(base)
    }

    /// The single-geometry type of a collection type; other types are
    /// returned unchanged.
    pub fn single(self) -> GeometryType {
        let base = match self.base {
            BaseType::MultiPoint => BaseType::Point,
            BaseType::MultiLineString => BaseType::LineString,
            BaseType::MultiPolygon => BaseType::Polygon,
            BaseType::MultiCurve => BaseType::CompoundCurve,
            BaseType::MultiSurface => BaseType::CurvePolygon,
            BaseType::GeometryCollection => BaseType::Unknown,
            base => base,
        };
        self.with_base(base)
    }

    /// The linear counterpart of a curve type. Faceted surfaces (triangles,
    /// TINs and polyhedral surfaces) are already linear and stay unchanged.
    pub fn linear(self) -> GeometryType {
        let base = match self.base {
            BaseType::CircularString | BaseType::CompoundCurve | BaseType::Curve => {
                BaseType::LineString
            }
            BaseType::CurvePolygon | BaseType::Surface => BaseType::Polygon,
            BaseType::MultiCurve => BaseType::MultiLineString,
            BaseType::MultiSurface => BaseType::MultiPolygon,
            base => base,
        };
        self.with_base(base)
    }

    /// The curve counterpart of a linear type.
    pub fn curve(self) -> GeometryType {
        let base = match self.base {
            BaseType::LineString => BaseType::CompoundCurve,
            BaseType::Polygon | BaseType::Triangle => BaseType::CurvePolygon,
            BaseType::MultiLineString => BaseType::MultiCurve,
            BaseType::MultiPolygon => BaseType::MultiSurface,
            base => base,
        };
        self.with_base(base)
    }

    /// ISO WKB code, e.g. 1003 for `POLYGON Z`.
    pub fn iso_code(self) -> u32 {
        let mut code = self.base.iso_code();
        if self.has_z() {
            code += 1000;
        }
        if self.has_m() {
            code += 2000;
        }
        code
    }

    pub fn from_iso_code(code: u32) -> Option<GeometryType> {
        let dims = match code / 1000 {
            0 => Dimensions::empty(),
            1 => Dimensions::Z,
            2 => Dimensions::M,
            3 => Dimensions::Z | Dimensions::M,
            _ => return None,
        };
        BaseType::ALL
            .into_iter()
            .find(|base| base.iso_code() == code % 1000)
            .map(|base| GeometryType::new(base, dims))
    }

    /// Parses an OGC type name such as `POLYGON`, `POINTZ`, `LINESTRING ZM`
    /// or `MULTIPOLYGON25D`, case-insensitively.
    pub fn from_ogc_name(name: &str) -> Option<GeometryType> {
        let upper = name.trim().to_ascii_uppercase();
        let suffixes = [
            ("ZM", Dimensions::Z | Dimensions::M),
            ("25D", Dimensions::Z),
            ("Z", Dimensions::Z),
            ("M", Dimensions::M),
        ];
        if let Some(base) = BaseType::from_ogc_name(&upper) {
            return Some(GeometryType::flat(base));
        }
        for (suffix, dims) in suffixes {
            if let Some(stem) = upper.strip_suffix(suffix) {
                if let Some(base) = BaseType::from_ogc_name(stem.trim_end()) {
                    return Some(GeometryType::new(base, dims));
                }
            }
        }
        None
    }

    /// The OGC name without separator before the dimension suffix, e.g.
    /// `POINTZM`.
    pub fn ogc_name(self) -> String {
        format!("{}{}", self.base.ogc_name(), self.dims_suffix())
    }

    fn dims_suffix(self) -> &'static str {
        match (self.has_z(), self.has_m()) {
            (false, false) => "",
            (true, false) => "Z",
            (false, true) => "M",
            (true, true) => "ZM",
        }
    }
}

impl Default for GeometryType {
    fn default() -> Self {
        GeometryType::UNKNOWN
    }
}

impl From<BaseType> for GeometryType {
    fn from(base: BaseType) -> Self {
        GeometryType::flat(base)
    }
}

/// Formats as in WKT, e.g. `POLYGON Z`.
impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.ogc_name())?;
        if !self.dims.is_empty() {
            write!(f, " {}", self.dims_suffix())?;
        }
        Ok(())
    }
}

impl FromStr for GeometryType {
    type Err = GdalError;

    fn from_str(s: &str) -> Result<Self> {
        GeometryType::from_ogc_name(s).ok_or_else(|| GdalError::InvalidGeometryType(s.to_string()))
    }
}

/// Type names starting with `prefix` (case-insensitive), each followed by its
/// Z, M and ZM variants.
pub fn geometry_type_completions(prefix: &str) -> Vec<String> {
    const VOCABULARY: [BaseType; 18] = [
        BaseType::Unknown,
        BaseType::Point,
        BaseType::LineString,
        BaseType::Polygon,
        BaseType::MultiPoint,
        BaseType::MultiLineString,
        BaseType::MultiPolygon,
        BaseType::GeometryCollection,
        BaseType::Curve,
        BaseType::CircularString,
        BaseType::CompoundCurve,
        BaseType::Surface,
        BaseType::CurvePolygon,
        BaseType::MultiCurve,
        BaseType::MultiSurface,
        BaseType::PolyhedralSurface,
        BaseType::Tin,
        BaseType::Triangle,
    ];

    let prefix = prefix.to_ascii_uppercase();
    VOCABULARY
        .into_iter()
        .filter(|base| base.ogc_name().starts_with(&prefix))
        .flat_map(|base| {
            let name = base.ogc_name();
            [
                name.to_string(),
                format!("{name}Z"),
                format!("{name}M"),
                format!("{name}ZM"),
            ]
        })
        .collect()
}
