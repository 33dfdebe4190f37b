use log::warn;

use super::flags::{
    Cardinality, CoordinateDimension, Form, GeometryTypeFlags, Scope, TypeRule,
};
use crate::errors::*;
use crate::vector::GeometryType;

/// Options of the set-type step.
///
/// Fields can be set directly, or parsed from command-line style arguments
/// with [`SetTypeOptions::new`]:
///
/// ```
/// use ogr_set_type::programs::vector::SetTypeOptions;
///
/// let options = SetTypeOptions::new(["--multi", "--active-geometry=geom", "--xyz"]).unwrap();
/// assert!(options.multi && options.xyz);
/// assert_eq!(options.active_geometry.as_deref(), Some("geom"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetTypeOptions {
    /// Name of the only layer to process; other layers pass through.
    pub active_layer: Option<String>,
    /// Name of the only geometry field to process.
    pub active_geometry: Option<String>,
    pub layer_only: bool,
    pub feature_only: bool,
    /// Explicit target type name, e.g. `MULTIPOLYGON Z`.
    pub geometry_type: Option<String>,
    pub multi: bool,
    pub single: bool,
    pub linear: bool,
    pub curve: bool,
    pub xy: bool,
    pub xyz: bool,
    pub xym: bool,
    pub xyzm: bool,
    /// Drop features whose geometry cannot be converted.
    pub skip: bool,
}

impl SetTypeOptions {
    /// Parses options from arguments such as `--multi`, `--geometry-type
    /// POLYGON` or `--active-layer=roads`.
    ///
    /// Only the syntax is checked here; see [`SetTypeOptions::validate`].
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(args: I) -> Result<Self> {
        let mut options = SetTypeOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let Some(stripped) = arg.strip_prefix("--") else {
                return Err(GdalError::BadArgument(format!("unexpected argument '{arg}'")));
            };
            let (name, inline_value) = match stripped.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (stripped, None),
            };

            let value_slot = match name {
                "active-layer" => Some(&mut options.active_layer),
                "active-geometry" => Some(&mut options.active_geometry),
                "geometry-type" => Some(&mut options.geometry_type),
                _ => None,
            };
            if let Some(slot) = value_slot {
                let value = match inline_value {
                    Some(value) => value,
                    None => args
                        .next()
                        .map(|v| v.as_ref().to_string())
                        .ok_or_else(|| {
                            GdalError::BadArgument(format!("--{name} requires a value"))
                        })?,
                };
                *slot = Some(value).filter(|v| !v.is_empty());
                continue;
            }

            let flag = match name {
                "layer-only" => &mut options.layer_only,
                "feature-only" => &mut options.feature_only,
                "multi" => &mut options.multi,
                "single" => &mut options.single,
                "linear" => &mut options.linear,
                "curve" => &mut options.curve,
                "xy" => &mut options.xy,
                "xyz" => &mut options.xyz,
                "xym" => &mut options.xym,
                "xyzm" => &mut options.xyzm,
                "skip" => &mut options.skip,
                _ => return Err(GdalError::BadArgument(format!("unknown argument '{arg}'"))),
            };
            if inline_value.is_some() {
                return Err(GdalError::BadArgument(format!("--{name} does not take a value")));
            }
            *flag = true;
        }
        Ok(options)
    }

    /// Checks option combinations and resolves the target type.
    pub fn validate(&self) -> Result<GeometryTypeFlags> {
        exclusive(&[("layer-only", self.layer_only), ("feature-only", self.feature_only)])?;
        exclusive(&[("multi", self.multi), ("single", self.single)])?;
        exclusive(&[("linear", self.linear), ("curve", self.curve)])?;
        exclusive(&[
            ("xy", self.xy),
            ("xyz", self.xyz),
            ("xym", self.xym),
            ("xyzm", self.xyzm),
        ])?;

        let scope = if self.layer_only {
            Scope::LayerOnly
        } else if self.feature_only {
            Scope::FeatureOnly
        } else {
            Scope::LayerAndFeatures
        };

        let rule = match self.geometry_type.as_deref().filter(|t| !t.is_empty()) {
            Some(name) => {
                let shape_flags = [
                    self.multi, self.single, self.linear, self.curve, self.xy, self.xyz,
                    self.xym, self.xyzm,
                ];
                if shape_flags.into_iter().any(|set| set) {
                    return Err(GdalError::ConflictingOptions {
                        options: "--geometry-type cannot be used with any of \
                                  --multi/single/linear/curve/xy/xyz/xym/xyzm"
                            .to_string(),
                    });
                }
                TypeRule::Explicit(parse_geometry_type(name)?)
            }
            None => TypeRule::Transform {
                cardinality: if self.multi {
                    Cardinality::Multi
                } else if self.single {
                    Cardinality::Single
                } else {
                    Cardinality::Keep
                },
                form: if self.linear {
                    Form::Linear
                } else if self.curve {
                    Form::Curve
                } else {
                    Form::Keep
                },
                dimension: if self.xy {
                    CoordinateDimension::Xy
                } else if self.xyz {
                    CoordinateDimension::Xyz
                } else if self.xym {
                    CoordinateDimension::Xym
                } else if self.xyzm {
                    CoordinateDimension::Xyzm
                } else {
                    CoordinateDimension::Keep
                },
            },
        };

        Ok(GeometryTypeFlags {
            scope,
            rule,
            geometry_field: self.active_geometry.clone().filter(|f| !f.is_empty()),
            skip_on_failure: self.skip,
        })
    }
}

impl TryFrom<Vec<&str>> for SetTypeOptions {
    type Error = GdalError;

    fn try_from(value: Vec<&str>) -> Result<Self> {
        SetTypeOptions::new(value)
    }
}

fn exclusive(group: &[(&str, bool)]) -> Result<()> {
    let set: Vec<String> = group
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| format!("--{name}"))
        .collect();
    if set.len() > 1 {
        return Err(GdalError::ConflictingOptions {
            options: format!("{} are mutually exclusive", set.join(" and ")),
        });
    }
    Ok(())
}

/// Unrecognized names starting with `GEOMETRY` resolve to the generic type.
fn parse_geometry_type(name: &str) -> Result<GeometryType> {
    if let Some(ty) = GeometryType::from_ogc_name(name) {
        return Ok(ty);
    }
    let is_generic = name
        .get(..8)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("GEOMETRY"));
    if is_generic {
        warn!("Unrecognized geometry type '{name}', using GEOMETRY");
        Ok(GeometryType::UNKNOWN)
    } else {
        Err(GdalError::InvalidGeometryType(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let options = SetTypeOptions::new([
            "--active-layer",
            "roads",
            "--geometry-type=multilinestring z",
            "--feature-only",
            "--skip",
        ])
        .unwrap();
        assert_eq!(
            options,
            SetTypeOptions {
                active_layer: Some("roads".to_string()),
                geometry_type: Some("multilinestring z".to_string()),
                feature_only: true,
                skip: true,
                ..Default::default()
            }
        );
        let from_vec: SetTypeOptions = vec!["--xym", "--curve"].try_into().unwrap();
        assert!(from_vec.xym && from_vec.curve);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            SetTypeOptions::new(["--wobble"]),
            Err(GdalError::BadArgument(_))
        ));
        assert!(matches!(
            SetTypeOptions::new(["--geometry-type"]),
            Err(GdalError::BadArgument(_))
        ));
        assert!(matches!(
            SetTypeOptions::new(["--multi=yes"]),
            Err(GdalError::BadArgument(_))
        ));
        assert!(matches!(
            SetTypeOptions::new(["multi"]),
            Err(GdalError::BadArgument(_))
        ));
    }

    #[test]
    fn test_validate_transform() {
        let flags = SetTypeOptions::new(["--single", "--linear", "--xyzm", "--layer-only"])
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(flags.scope, Scope::LayerOnly);
        assert_eq!(
            flags.rule,
            TypeRule::Transform {
                cardinality: Cardinality::Single,
                form: Form::Linear,
                dimension: CoordinateDimension::Xyzm,
            }
        );
        assert!(!flags.skip_on_failure);
        assert_eq!(flags.geometry_field, None);
    }

    #[test]
    fn test_validate_explicit_type() {
        let options = SetTypeOptions {
            geometry_type: Some("PolygonZM".to_string()),
            active_geometry: Some(String::new()),
            ..Default::default()
        };
        let flags = options.validate().unwrap();
        assert_eq!(
            flags.rule,
            TypeRule::Explicit(GeometryType::POLYGON.set_z().set_m())
        );
        assert_eq!(flags.geometry_field, None);
    }

    #[test]
    fn test_explicit_type_conflicts_with_shape_flags() {
        for flag in ["--multi", "--single", "--linear", "--curve", "--xy", "--xyz", "--xym", "--xyzm"] {
            let options = SetTypeOptions::new(["--geometry-type", "POINT", flag]).unwrap();
            assert_eq!(
                options.validate(),
                Err(GdalError::ConflictingOptions {
                    options: "--geometry-type cannot be used with any of \
                              --multi/single/linear/curve/xy/xyz/xym/xyzm"
                        .to_string()
                })
            );
        }
    }

    #[test]
    fn test_exclusive_groups() {
        for pair in [
            ["--layer-only", "--feature-only"],
            ["--multi", "--single"],
            ["--linear", "--curve"],
            ["--xy", "--xyzm"],
        ] {
            let options = SetTypeOptions::new(pair).unwrap();
            assert!(matches!(
                options.validate(),
                Err(GdalError::ConflictingOptions { .. })
            ));
        }
    }

    #[test]
    fn test_geometry_type_names() {
        let validate = |name: &str| {
            SetTypeOptions {
                geometry_type: Some(name.to_string()),
                ..Default::default()
            }
            .validate()
            .map(|flags| flags.rule)
        };
        assert_eq!(
            validate("GEOMETRY Z"),
            Ok(TypeRule::Explicit(GeometryType::UNKNOWN.set_z()))
        );
        assert_eq!(
            validate("geometryfoo"),
            Ok(TypeRule::Explicit(GeometryType::UNKNOWN))
        );
        assert_eq!(
            validate("POLYGON25D"),
            Ok(TypeRule::Explicit(GeometryType::POLYGON.set_z()))
        );
        assert_eq!(
            validate("HEXAGON"),
            Err(GdalError::InvalidGeometryType("HEXAGON".to_string()))
        );
    }
}
