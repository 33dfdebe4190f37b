//! Spatial reference systems attached to geometry fields and geometries.
//!
//! Only the identity of a spatial reference is modelled: an authority code
//! such as `EPSG:4326`, or an opaque definition string. No coordinate
//! transformation is performed anywhere in this crate.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::errors::{GdalError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpatialRef {
    authority: Option<(String, i32)>,
    definition: String,
}

impl SpatialRef {
    /// Spatial reference identified by an EPSG code.
    pub fn from_epsg(epsg_code: u32) -> SpatialRef {
        SpatialRef {
            authority: Some(("EPSG".to_string(), epsg_code as i32)),
            definition: format!("EPSG:{epsg_code}"),
        }
    }

    /// Spatial reference from a user supplied definition.
    ///
    /// `AUTHORITY:CODE` strings are recognised as authority codes, anything
    /// else is kept verbatim as an opaque definition (WKT, PROJ string...).
    pub fn from_definition(definition: &str) -> Result<SpatialRef> {
        let definition = definition.trim();
        if definition.is_empty() {
            return Err(GdalError::BadArgument(
                "empty spatial reference definition".to_string(),
            ));
        }
        let authority = definition.split_once(':').and_then(|(name, code)| {
            let code = code.parse::<i32>().ok()?;
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
                return None;
            }
            Some((name.to_ascii_uppercase(), code))
        });
        let definition = match &authority {
            Some((name, code)) => format!("{name}:{code}"),
            None => definition.to_string(),
        };
        Ok(SpatialRef {
            authority,
            definition,
        })
    }

    pub fn auth_name(&self) -> Option<&str> {
        self.authority.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn auth_code(&self) -> Option<i32> {
        self.authority.as_ref().map(|(_, code)| *code)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl Display for SpatialRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}

impl FromStr for SpatialRef {
    type Err = GdalError;

    fn from_str(s: &str) -> Result<Self> {
        SpatialRef::from_definition(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_epsg() {
        let srs = SpatialRef::from_epsg(4326);
        assert_eq!(srs.auth_name(), Some("EPSG"));
        assert_eq!(srs.auth_code(), Some(4326));
        assert_eq!(srs.to_string(), "EPSG:4326");
    }

    #[test]
    fn authority_definitions_are_normalized() {
        let srs: SpatialRef = "epsg:3857".parse().unwrap();
        assert_eq!(srs, SpatialRef::from_epsg(3857));
    }

    #[test]
    fn opaque_definition() {
        let srs = SpatialRef::from_definition("+proj=longlat +datum=WGS84").unwrap();
        assert_eq!(srs.auth_code(), None);
        assert_eq!(srs.definition(), "+proj=longlat +datum=WGS84");
        assert!(SpatialRef::from_definition("  ").is_err());
    }
}
