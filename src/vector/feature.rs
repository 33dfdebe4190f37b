use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::errors::*;
use crate::vector::{Defn, FieldType, Geometry};

/// OGR Feature
///
/// A feature holds one optional value per attribute field and one optional
/// geometry per geometry field of the [`Defn`] it is bound to.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    defn: Arc<Defn>,
    fid: Option<u64>,
    fields: Vec<Option<FieldValue>>,
    geometries: Vec<Option<Geometry>>,
}

impl Feature {
    /// Creates an empty feature laid out for `defn`.
    pub fn new(defn: Arc<Defn>) -> Feature {
        Feature {
            fid: None,
            fields: vec![None; defn.field_count()],
            geometries: vec![None; defn.geom_field_count()],
            defn,
        }
    }

    pub fn defn(&self) -> &Arc<Defn> {
        &self.defn
    }

    /// Binds the feature to another definition with the same layout without
    /// touching any value.
    pub(crate) fn set_defn_unchecked(&mut self, defn: Arc<Defn>) {
        debug_assert!(defn.same_layout(&self.defn));
        self.defn = defn;
    }

    /// Get the value of the feature's FID field, if any.
    pub fn fid(&self) -> Option<u64> {
        self.fid
    }

    pub fn set_fid(&mut self, fid: Option<u64>) {
        self.fid = fid;
    }

    /// Get the value of a named field. If the field exists, it returns a
    /// `FieldValue` wrapper, that you need to unpack to a base type
    /// (string, float, etc). Null fields yield `None`.
    pub fn field(&self, name: &str) -> Result<Option<FieldValue>> {
        let idx = self.defn.field_index(name)?;
        self.field_by_index(idx)
    }

    pub fn field_by_index(&self, idx: usize) -> Result<Option<FieldValue>> {
        self.fields
            .get(idx)
            .cloned()
            .ok_or(GdalError::InvalidFieldIndex {
                index: idx,
                method_name: "field_by_index",
            })
    }

    /// Iterate over `(name, value)` pairs of the attribute fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.defn
            .fields()
            .zip(&self.fields)
            .map(|(defn, value)| (defn.name(), value.as_ref()))
    }

    pub fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<()> {
        let idx = self.defn.field_index(name)?;
        self.set_field_by_index(idx, value)
    }

    pub fn set_field_by_index(&mut self, idx: usize, value: &FieldValue) -> Result<()> {
        let slot = self
            .fields
            .get_mut(idx)
            .ok_or(GdalError::InvalidFieldIndex {
                index: idx,
                method_name: "set_field_by_index",
            })?;
        *slot = Some(value.clone());
        Ok(())
    }

    pub fn set_field_null(&mut self, name: &str) -> Result<()> {
        let idx = self.defn.field_index(name)?;
        self.fields[idx] = None;
        Ok(())
    }

    pub fn geom_field_count(&self) -> usize {
        self.geometries.len()
    }

    /// Get the feature's geometry, from the first geometry field.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometries.first().and_then(Option::as_ref)
    }

    pub fn geometry_by_name(&self, field_name: &str) -> Result<Option<&Geometry>> {
        let idx = self
            .defn
            .geom_field_index(field_name)
            .map_err(|_| GdalError::InvalidFieldName {
                field_name: field_name.to_string(),
                method_name: "geometry_by_name",
            })?;
        self.geometry_by_index(idx)
    }

    pub fn geometry_by_index(&self, idx: usize) -> Result<Option<&Geometry>> {
        self.geometries
            .get(idx)
            .map(Option::as_ref)
            .ok_or(GdalError::InvalidFieldIndex {
                index: idx,
                method_name: "geometry_by_index",
            })
    }

    pub fn geometry_mut(&mut self, idx: usize) -> Option<&mut Geometry> {
        self.geometries.get_mut(idx).and_then(Option::as_mut)
    }

    /// Removes the geometry of field `idx` from the feature, leaving the
    /// field null.
    pub fn take_geometry(&mut self, idx: usize) -> Option<Geometry> {
        self.geometries.get_mut(idx).and_then(Option::take)
    }

    /// Sets the geometry of the first geometry field.
    pub fn set_geometry(&mut self, geom: Geometry) -> Result<()> {
        self.set_geometry_by_index(0, Some(geom))
    }

    pub fn set_geometry_by_index(&mut self, idx: usize, geom: Option<Geometry>) -> Result<()> {
        let slot = self
            .geometries
            .get_mut(idx)
            .ok_or(GdalError::InvalidFieldIndex {
                index: idx,
                method_name: "set_geometry_by_index",
            })?;
        *slot = geom;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    IntegerValue(i32),
    IntegerListValue(Vec<i32>),
    Integer64Value(i64),
    Integer64ListValue(Vec<i64>),
    StringValue(String),
    StringListValue(Vec<String>),
    RealValue(f64),
    RealListValue(Vec<f64>),
    DateValue(NaiveDate),
    DateTimeValue(DateTime<FixedOffset>),
}

impl FieldValue {
    /// Interpret the value as `String`. Returns `None` if the value is something else.
    pub fn into_string(self) -> Option<String> {
        match self {
            FieldValue::StringValue(rv) => Some(rv),
            _ => None,
        }
    }

    /// Interpret the value as `f64`. Integers are widened.
    pub fn into_real(self) -> Option<f64> {
        match self {
            FieldValue::RealValue(rv) => Some(rv),
            FieldValue::IntegerValue(rv) => Some(f64::from(rv)),
            FieldValue::Integer64Value(rv) => Some(rv as f64),
            _ => None,
        }
    }

    /// Interpret the value as `i32`.
    pub fn into_int(self) -> Option<i32> {
        match self {
            FieldValue::IntegerValue(rv) => Some(rv),
            FieldValue::Integer64Value(rv) => i32::try_from(rv).ok(),
            _ => None,
        }
    }

    /// Interpret the value as `i64`.
    pub fn into_int64(self) -> Option<i64> {
        match self {
            FieldValue::IntegerValue(rv) => Some(i64::from(rv)),
            FieldValue::Integer64Value(rv) => Some(rv),
            _ => None,
        }
    }

    pub fn into_date(self) -> Option<NaiveDate> {
        match self {
            FieldValue::DateValue(rv) => Some(rv),
            FieldValue::DateTimeValue(rv) => Some(rv.date_naive()),
            _ => None,
        }
    }

    pub fn into_datetime(self) -> Option<DateTime<FixedOffset>> {
        match self {
            FieldValue::DateTimeValue(rv) => Some(rv),
            _ => None,
        }
    }

    /// Return the corresponding field type.
    pub fn ogr_field_type(&self) -> FieldType {
        match self {
            FieldValue::IntegerValue(_) => FieldType::Integer,
            FieldValue::IntegerListValue(_) => FieldType::IntegerList,
            FieldValue::Integer64Value(_) => FieldType::Integer64,
            FieldValue::Integer64ListValue(_) => FieldType::Integer64List,
            FieldValue::StringValue(_) => FieldType::String,
            FieldValue::StringListValue(_) => FieldType::StringList,
            FieldValue::RealValue(_) => FieldType::Real,
            FieldValue::RealListValue(_) => FieldType::RealList,
            FieldValue::DateValue(_) => FieldType::Date,
            FieldValue::DateTimeValue(_) => FieldType::DateTime,
        }
    }
}
