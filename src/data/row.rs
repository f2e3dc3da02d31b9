use anyhow::{anyhow, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::data::field::DataField;
use crate::data::value::FieldValue;
use crate::error::TableError;

/// An ordered mapping of field name to field, case-sensitive keys.
///
/// Insertion order is the canonical column order for the row; overwriting
/// a field keeps its original position. Every field is owned by the row,
/// so `Clone` deep-copies values and attribute maps alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    fields: Vec<(String, DataField)>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a row from `(name, payload)` pairs in column order.
    pub fn from_pairs<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, FieldValue)>,
        N: Into<String>,
    {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.set_field_value(name.into(), value);
        }
        row
    }

    /// Materialize a row from a JSON object, key order preserved.
    pub fn from_json(json: &JsonValue) -> Result<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| anyhow!("expected a JSON object, got {}", json))?;
        let mut row = Self::new();
        for (name, value) in obj {
            row.set_field_value(name.clone(), FieldValue::from_json(value));
        }
        Ok(row)
    }

    /// Insert or overwrite a field. Overwrites keep the original position,
    /// new names append.
    pub fn set_field(&mut self, name: impl Into<String>, field: DataField) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = field,
            None => self.fields.push((name, field)),
        }
    }

    pub fn set_field_value(&mut self, name: impl Into<String>, value: FieldValue) {
        self.set_field(name, DataField::new(value));
    }

    pub fn field(&self, name: &str) -> Result<&DataField, TableError> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .ok_or_else(|| TableError::field_not_found(name))
    }

    /// Case-insensitive lookup; first case-folded match wins.
    pub fn field_ci(&self, name: &str) -> Result<&DataField, TableError> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, f)| f)
            .ok_or_else(|| TableError::field_not_found(name))
    }

    pub fn field_mut(&mut self, name: &str) -> Result<&mut DataField, TableError> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .ok_or_else(|| TableError::field_not_found(name))
    }

    pub fn field_value(&self, name: &str) -> Result<&FieldValue, TableError> {
        self.field(name).map(DataField::value)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Remove a field as a unit; returns it if present.
    pub fn remove_field(&mut self, name: &str) -> Option<DataField> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataField)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Rows serialize as JSON objects in field order; field attributes stay
/// off the wire.
impl Serialize for DataRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, field) in &self.fields {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> DataRow {
        DataRow::from_pairs([
            ("NAME", FieldValue::from("Freeman")),
            ("CUSTOMERID", FieldValue::Int(1)),
            ("AGE", FieldValue::Int(62)),
        ])
    }

    #[test]
    fn test_insertion_order_is_canonical() {
        let row = sample_row();
        assert_eq!(row.field_names(), vec!["NAME", "CUSTOMERID", "AGE"]);
    }

    #[test]
    fn test_overwrite_preserves_position() {
        let mut row = sample_row();
        row.set_field_value("CUSTOMERID", FieldValue::Int(99));
        assert_eq!(row.field_names(), vec!["NAME", "CUSTOMERID", "AGE"]);
        assert_eq!(row.field("CUSTOMERID").unwrap().as_int().unwrap(), 99);
    }

    #[test]
    fn test_field_lookup_is_case_sensitive() {
        let row = sample_row();
        assert!(row.field("NAME").is_ok());
        assert_eq!(
            row.field("name").unwrap_err(),
            TableError::field_not_found("name")
        );
        assert_eq!(row.field_ci("name").unwrap().as_str(), "Freeman");
    }

    #[test]
    fn test_remove_field() {
        let mut row = sample_row();
        let removed = row.remove_field("AGE").unwrap();
        assert_eq!(removed.as_int().unwrap(), 62);
        assert!(!row.contains_field("AGE"));
        assert_eq!(row.len(), 2);
        assert!(row.remove_field("AGE").is_none());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = sample_row();
        let mut copy = original.clone();
        copy.field_mut("NAME")
            .unwrap()
            .set_value(FieldValue::from("Heinz"));
        copy.field_mut("AGE").unwrap().set_attribute("LABEL", "age");
        assert_eq!(original.field("NAME").unwrap().as_str(), "Freeman");
        assert_eq!(original.field("AGE").unwrap().attribute("LABEL"), None);
    }

    #[test]
    fn test_from_json_object() {
        let row = DataRow::from_json(&json!({
            "id": 1,
            "name": "Alice",
            "active": true,
            "note": null
        }))
        .unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row.field_value("id").unwrap(), &FieldValue::Int(1));
        assert!(row.field("note").unwrap().is_null());
        assert!(DataRow::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let row = DataRow::from_json(&json!({
            "ZIP": "66132",
            "NAME": "Heinz",
            "AGE": 62
        }))
        .unwrap();
        // Source key order is the canonical column order, not sorted order
        assert_eq!(row.field_names(), vec!["ZIP", "NAME", "AGE"]);
    }

    #[test]
    fn test_serializes_as_object() {
        let row = sample_row();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            json!({
                "NAME": { "Str": "Freeman" },
                "CUSTOMERID": { "Int": 1 },
                "AGE": { "Int": 62 }
            })
        );
    }
}
