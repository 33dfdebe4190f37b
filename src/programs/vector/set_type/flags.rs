use crate::vector::{BaseType, GeometryType};

/// Which of the declared layer type and the feature geometries are rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    LayerAndFeatures,
    /// Only the geometry type declared by the layer definition changes.
    LayerOnly,
    /// Only feature geometries change; the layer keeps its declared type.
    FeatureOnly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cardinality {
    #[default]
    Keep,
    Multi,
    Single,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Form {
    #[default]
    Keep,
    Linear,
    Curve,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordinateDimension {
    #[default]
    Keep,
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

/// How a target geometry type is derived from a source type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRule {
    /// Every geometry gets this type.
    Explicit(GeometryType),
    /// The source type is changed step by step: cardinality first, then
    /// linear/curve form, then coordinate dimension.
    Transform {
        cardinality: Cardinality,
        form: Form,
        dimension: CoordinateDimension,
    },
}

impl Default for TypeRule {
    fn default() -> Self {
        TypeRule::Transform {
            cardinality: Cardinality::Keep,
            form: Form::Keep,
            dimension: CoordinateDimension::Keep,
        }
    }
}

impl TypeRule {
    /// Target type for geometries of type `source`.
    pub fn convert_type(&self, source: GeometryType) -> GeometryType {
        let (cardinality, form, dimension) = match *self {
            TypeRule::Explicit(target) => return target,
            TypeRule::Transform {
                cardinality,
                form,
                dimension,
            } => (cardinality, form, dimension),
        };

        let ty = match cardinality {
            Cardinality::Keep => source,
            // Faceted surfaces generalize to multipolygons, not multisurfaces.
            Cardinality::Multi => match source.base() {
                BaseType::Triangle | BaseType::Tin | BaseType::PolyhedralSurface => {
                    source.with_base(BaseType::MultiPolygon)
                }
                _ if !source.is_subclass_of(GeometryType::GEOMETRY_COLLECTION) => {
                    source.collection()
                }
                _ => source,
            },
            Cardinality::Single => source.single(),
        };

        let ty = match form {
            Form::Keep => ty,
            Form::Linear => ty.linear(),
            Form::Curve => ty.curve(),
        };

        match dimension {
            CoordinateDimension::Keep => ty,
            CoordinateDimension::Xy => ty.flatten(),
            CoordinateDimension::Xyz => ty.flatten().set_z(),
            CoordinateDimension::Xym => ty.flatten().set_m(),
            CoordinateDimension::Xyzm => ty.flatten().set_z().set_m(),
        }
    }
}

/// Validated settings of the set-type step, shared by every layer it wraps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometryTypeFlags {
    pub scope: Scope,
    pub rule: TypeRule,
    /// Restricts processing to the geometry field of that name.
    pub geometry_field: Option<String>,
    /// Drop features whose geometry cannot be converted instead of keeping
    /// them with a null geometry.
    pub skip_on_failure: bool,
}

impl GeometryTypeFlags {
    pub fn convert_type(&self, source: GeometryType) -> GeometryType {
        self.rule.convert_type(source)
    }

    /// Whether the geometry field named `name` is processed.
    pub fn applies_to_field(&self, name: &str) -> bool {
        self.geometry_field
            .as_deref()
            .map_or(true, |field| field == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(
        cardinality: Cardinality,
        form: Form,
        dimension: CoordinateDimension,
    ) -> TypeRule {
        TypeRule::Transform {
            cardinality,
            form,
            dimension,
        }
    }

    fn all_types() -> Vec<GeometryType> {
        let mut types = Vec::new();
        for base in BaseType::ALL {
            let ty = GeometryType::flat(base);
            types.extend([ty, ty.set_z(), ty.set_m(), ty.set_z().set_m()]);
        }
        types
    }

    fn all_rules() -> Vec<TypeRule> {
        let mut rules = Vec::new();
        for cardinality in [Cardinality::Keep, Cardinality::Multi, Cardinality::Single] {
            for form in [Form::Keep, Form::Linear, Form::Curve] {
                for dimension in [
                    CoordinateDimension::Keep,
                    CoordinateDimension::Xy,
                    CoordinateDimension::Xyz,
                    CoordinateDimension::Xym,
                    CoordinateDimension::Xyzm,
                ] {
                    rules.push(transform(cardinality, form, dimension));
                }
            }
        }
        rules
    }

    #[test]
    fn test_explicit_type_is_returned_verbatim() {
        let rule = TypeRule::Explicit(GeometryType::MULTI_POLYGON.set_z());
        for source in all_types() {
            assert_eq!(rule.convert_type(source), GeometryType::MULTI_POLYGON.set_z());
        }
    }

    #[test]
    fn test_keep_everything_is_identity() {
        for source in all_types() {
            assert_eq!(TypeRule::default().convert_type(source), source);
        }
    }

    #[test]
    fn test_conversion_is_idempotent() {
        for rule in all_rules() {
            for source in all_types() {
                let once = rule.convert_type(source);
                assert_eq!(rule.convert_type(once), once, "{rule:?} on {source}");
            }
        }
    }

    #[test]
    fn test_multi_then_single_round_trips() {
        let multi = transform(Cardinality::Multi, Form::Keep, CoordinateDimension::Keep);
        let single = transform(Cardinality::Single, Form::Keep, CoordinateDimension::Keep);
        for source in [
            GeometryType::POINT,
            GeometryType::LINE_STRING.set_z(),
            GeometryType::POLYGON.set_m(),
        ] {
            let wrapped = multi.convert_type(source);
            assert!(wrapped.is_collection());
            assert_eq!(single.convert_type(wrapped), source);
        }
        assert_eq!(
            multi.convert_type(GeometryType::CIRCULAR_STRING),
            GeometryType::MULTI_CURVE
        );
        assert_eq!(
            single.convert_type(GeometryType::MULTI_CURVE),
            GeometryType::COMPOUND_CURVE
        );
        assert_eq!(
            single.convert_type(GeometryType::GEOMETRY_COLLECTION),
            GeometryType::UNKNOWN
        );
        assert_eq!(multi.convert_type(GeometryType::UNKNOWN), GeometryType::UNKNOWN);
        assert_eq!(
            multi.convert_type(GeometryType::MULTI_POINT),
            GeometryType::MULTI_POINT
        );
    }

    #[test]
    fn test_faceted_surfaces_become_multipolygons() {
        let multi = transform(Cardinality::Multi, Form::Keep, CoordinateDimension::Keep);
        for source in [
            GeometryType::TRIANGLE,
            GeometryType::TIN,
            GeometryType::POLYHEDRAL_SURFACE,
        ] {
            assert_eq!(multi.convert_type(source), GeometryType::MULTI_POLYGON);
            assert_eq!(
                multi.convert_type(source.set_z()),
                GeometryType::MULTI_POLYGON.set_z()
            );
        }
    }

    #[test]
    fn test_linear_and_curve_forms() {
        let linear = transform(Cardinality::Keep, Form::Linear, CoordinateDimension::Keep);
        let curve = transform(Cardinality::Keep, Form::Curve, CoordinateDimension::Keep);
        assert_eq!(
            linear.convert_type(GeometryType::MULTI_SURFACE.set_z()),
            GeometryType::MULTI_POLYGON.set_z()
        );
        assert_eq!(
            linear.convert_type(GeometryType::COMPOUND_CURVE),
            GeometryType::LINE_STRING
        );
        assert_eq!(
            curve.convert_type(GeometryType::POLYGON),
            GeometryType::CURVE_POLYGON
        );
        assert_eq!(
            curve.convert_type(GeometryType::MULTI_LINE_STRING),
            GeometryType::MULTI_CURVE
        );
        assert_eq!(curve.convert_type(GeometryType::POINT), GeometryType::POINT);
    }

    #[test]
    fn test_dimension_flags_fully_determine_dimensions() {
        let cases = [
            (CoordinateDimension::Xy, false, false),
            (CoordinateDimension::Xyz, true, false),
            (CoordinateDimension::Xym, false, true),
            (CoordinateDimension::Xyzm, true, true),
        ];
        for (dimension, z, m) in cases {
            let rule = transform(Cardinality::Keep, Form::Keep, dimension);
            for source in all_types() {
                let target = rule.convert_type(source);
                assert_eq!(target.base(), source.base());
                assert_eq!((target.has_z(), target.has_m()), (z, m));
            }
        }
    }

    #[test]
    fn test_steps_compose() {
        let rule = transform(Cardinality::Multi, Form::Curve, CoordinateDimension::Xyz);
        assert_eq!(
            rule.convert_type(GeometryType::LINE_STRING.set_m()),
            GeometryType::MULTI_CURVE.set_z()
        );
        let rule = transform(Cardinality::Single, Form::Linear, CoordinateDimension::Xy);
        assert_eq!(
            rule.convert_type(GeometryType::MULTI_SURFACE.set_z().set_m()),
            GeometryType::POLYGON
        );
    }

    #[test]
    fn test_applies_to_field() {
        let mut flags = GeometryTypeFlags::default();
        assert!(flags.applies_to_field("geom1"));
        flags.geometry_field = Some("geom2".to_string());
        assert!(!flags.applies_to_field("geom1"));
        assert!(flags.applies_to_field("geom2"));
    }
}
