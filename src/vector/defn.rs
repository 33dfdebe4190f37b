use std::fmt::{self, Display, Formatter};

use crate::errors::*;
use crate::spatial_ref::SpatialRef;
use crate::vector::GeometryType;

/// Attribute field types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    IntegerList,
    Integer64,
    Integer64List,
    Real,
    RealList,
    String,
    StringList,
    Date,
    DateTime,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Integer => "Integer",
            FieldType::IntegerList => "IntegerList",
            FieldType::Integer64 => "Integer64",
            FieldType::Integer64List => "Integer64List",
            FieldType::Real => "Real",
            FieldType::RealList => "RealList",
            FieldType::String => "String",
            FieldType::StringList => "StringList",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
        };
        f.write_str(name)
    }
}

/// Definition of an attribute field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefn {
    name: String,
    field_type: FieldType,
    nullable: bool,
}

impl FieldDefn {
    pub fn new(name: &str, field_type: FieldType) -> FieldDefn {
        FieldDefn {
            name: name.to_string(),
            field_type,
            nullable: true,
        }
    }

    /// Get the name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the data type of this field.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Return whether this field can receive null values.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn set_nullable(&mut self, nullable: bool) {
        self.nullable = nullable;
    }
}

/// Definition of a geometry field: its declared geometry type and spatial
/// reference.
#[derive(Clone, Debug, PartialEq)]
pub struct GeomFieldDefn {
    name: String,
    field_type: GeometryType,
    spatial_ref: Option<SpatialRef>,
}

impl GeomFieldDefn {
    pub fn new(name: &str, field_type: GeometryType) -> GeomFieldDefn {
        GeomFieldDefn {
            name: name.to_string(),
            field_type,
            spatial_ref: None,
        }
    }

    pub fn with_spatial_ref(mut self, spatial_ref: SpatialRef) -> GeomFieldDefn {
        self.spatial_ref = Some(spatial_ref);
        self
    }

    /// Get the name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> GeometryType {
        self.field_type
    }

    pub fn set_field_type(&mut self, field_type: GeometryType) {
        self.field_type = field_type;
    }

    pub fn spatial_ref(&self) -> Option<&SpatialRef> {
        self.spatial_ref.as_ref()
    }

    pub fn set_spatial_ref(&mut self, spatial_ref: Option<SpatialRef>) {
        self.spatial_ref = spatial_ref;
    }
}

/// Layer definition
///
/// Defines the fields available for features in a layer. Layers hand out
/// their definition as an `Arc<Defn>` that features keep a reference to.
#[derive(Clone, Debug, PartialEq)]
pub struct Defn {
    name: String,
    fields: Vec<FieldDefn>,
    geom_fields: Vec<GeomFieldDefn>,
}

impl Defn {
    pub fn new(name: &str) -> Defn {
        Defn {
            name: name.to_string(),
            fields: Vec::new(),
            geom_fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_field(&mut self, field: FieldDefn) {
        self.fields.push(field);
    }

    pub fn add_geom_field(&mut self, field: GeomFieldDefn) {
        self.geom_fields.push(field);
    }

    /// Iterate over the field schema of this layer.
    pub fn fields(&self) -> std::slice::Iter<'_, FieldDefn> {
        self.fields.iter()
    }

    /// Iterate over the geometry field schema of this layer.
    pub fn geom_fields(&self) -> std::slice::Iter<'_, GeomFieldDefn> {
        self.geom_fields.iter()
    }

    pub fn geom_fields_mut(&mut self) -> std::slice::IterMut<'_, GeomFieldDefn> {
        self.geom_fields.iter_mut()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn geom_field_count(&self) -> usize {
        self.geom_fields.len()
    }

    pub fn field(&self, index: usize) -> Option<&FieldDefn> {
        self.fields.get(index)
    }

    pub fn geom_field(&self, index: usize) -> Option<&GeomFieldDefn> {
        self.geom_fields.get(index)
    }

    /// Index of the attribute field named `name`, compared case-insensitively.
    pub fn field_index(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GdalError::InvalidFieldName {
                field_name: name.to_string(),
                method_name: "field_index",
            })
    }

    /// Index of the geometry field named `name`, compared case-insensitively.
    pub fn geom_field_index(&self, name: &str) -> Result<usize> {
        self.geom_fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GdalError::InvalidFieldName {
                field_name: name.to_string(),
                method_name: "geom_field_index",
            })
    }

    /// Get the geometry type of the first geometry field
    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.geom_fields.first().map(GeomFieldDefn::field_type)
    }

    /// Whether features built for `other` can be bound to this definition.
    pub fn same_layout(&self, other: &Defn) -> bool {
        self.fields.len() == other.fields.len() && self.geom_fields.len() == other.geom_fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let mut defn = Defn::new("places");
        defn.add_field(FieldDefn::new("Name", FieldType::String));
        defn.add_geom_field(
            GeomFieldDefn::new("geom", GeometryType::POINT)
                .with_spatial_ref(SpatialRef::from_epsg(4326)),
        );

        assert_eq!(defn.field_index("name"), Ok(0));
        assert_eq!(defn.geom_field_index("GEOM"), Ok(0));
        assert_eq!(
            defn.field_index("missing"),
            Err(GdalError::InvalidFieldName {
                field_name: "missing".to_string(),
                method_name: "field_index",
            })
        );
        assert_eq!(defn.geometry_type(), Some(GeometryType::POINT));
        assert_eq!(
            defn.geom_field(0).and_then(GeomFieldDefn::spatial_ref),
            Some(&SpatialRef::from_epsg(4326))
        );
    }

    #[test]
    fn test_no_geometry_field() {
        let defn = Defn::new("table");
        assert_eq!(defn.geometry_type(), None);
        assert_eq!(defn.geom_fields().count(), 0);
    }
}
