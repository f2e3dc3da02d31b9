use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use crate::data::convert;
use crate::data::value::FieldValue;
use crate::error::TableError;

/// Attribute name under which the cached fingerprint lives.
pub const ETAG_ATTRIBUTE: &str = "ETAG";

/// A typed metadata entry attached to a field, orthogonal to its payload.
/// String is the only variant today; the enum leaves room for more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Str(String),
}

impl Attribute {
    pub fn string(value: impl Into<String>) -> Self {
        Attribute::Str(value.into())
    }

    pub fn value(&self) -> &str {
        match self {
            Attribute::Str(s) => s,
        }
    }
}

/// A single typed cell: an opaque payload plus a coercion surface and a
/// side map of metadata attributes.
///
/// The coercion getters never mutate the payload; conversion failures come
/// back as `TypeMismatch` and are recoverable. Equality compares payloads
/// by their string rendering (attributes are metadata, not identity).
#[derive(Debug, Clone)]
pub struct DataField {
    value: FieldValue,
    attributes: Vec<(String, Attribute)>,
}

impl DataField {
    pub fn new(value: FieldValue) -> Self {
        Self {
            value,
            attributes: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(FieldValue::Null)
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Replace the payload. Unconditionally drops any cached fingerprint;
    /// a stale ETAG must not survive a payload change.
    pub fn set_value(&mut self, value: FieldValue) {
        self.remove_attribute(ETAG_ATTRIBUTE);
        self.value = value;
    }

    /// Reset the payload to the empty state.
    pub fn clear(&mut self) {
        self.set_value(FieldValue::Null);
    }

    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    // --- coercion surface ---

    /// Total string rendering of the payload; empty string when no rule
    /// applies or the payload is null.
    pub fn as_str(&self) -> String {
        convert::to_display_string(&self.value)
    }

    pub fn as_bool(&self) -> Result<bool, TableError> {
        convert::to_bool(&self.value)
    }

    pub fn as_int(&self) -> Result<i32, TableError> {
        convert::to_int(&self.value)
    }

    pub fn as_short(&self) -> Result<i16, TableError> {
        convert::to_short(&self.value)
    }

    pub fn as_long(&self) -> Result<i64, TableError> {
        convert::to_long(&self.value)
    }

    pub fn as_decimal(&self) -> Result<f64, TableError> {
        convert::to_decimal(&self.value)
    }

    pub fn as_double(&self) -> Result<f64, TableError> {
        convert::to_double(&self.value)
    }

    pub fn as_float(&self) -> Result<f32, TableError> {
        convert::to_float(&self.value)
    }

    pub fn as_date(&self) -> Result<Option<NaiveDate>, TableError> {
        convert::to_date(&self.value)
    }

    pub fn as_time(&self) -> Result<Option<NaiveTime>, TableError> {
        convert::to_time(&self.value)
    }

    pub fn as_timestamp(&self) -> Result<Option<NaiveDateTime>, TableError> {
        convert::to_timestamp(&self.value)
    }

    pub fn as_bytes(&self) -> Result<&[u8], TableError> {
        convert::to_bytes(&self.value)
    }

    // --- comparison ---

    /// Pattern equality with the default modes: case-insensitive, trimmed.
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        self.matches_pattern_with(pattern, false, true)
    }

    /// Pattern equality. A pattern wrapped in single quotes is unquoted
    /// before comparison. Only string and integer payloads carry a
    /// comparison rule; every other kind logs a warning and resolves to
    /// false so row scans stay total.
    pub fn matches_pattern_with(
        &self,
        pattern: &str,
        case_sensitive: bool,
        trimmed: bool,
    ) -> bool {
        let pattern = if pattern.len() >= 2 && pattern.starts_with('\'') && pattern.ends_with('\'')
        {
            &pattern[1..pattern.len() - 1]
        } else {
            pattern
        };

        match &self.value {
            FieldValue::Int(n) => pattern.parse::<i32>().map(|p| *n == p).unwrap_or(false),
            FieldValue::Str(s) => convert::compare_string(s, pattern, case_sensitive, trimmed),
            other => {
                warn!("{}", TableError::UnsupportedComparison(other.type_name()));
                false
            }
        }
    }

    // --- fingerprint ---

    /// Deterministic content hash of the payload, cached as the `ETAG`
    /// attribute until the next `set_value`. A payload that cannot be
    /// canonically serialized yields an empty fingerprint, never an error.
    pub fn etag(&mut self) -> String {
        if let Some(cached) = self.attribute(ETAG_ATTRIBUTE) {
            return cached.to_string();
        }
        match compute_etag(&self.value) {
            Ok(etag) => {
                self.set_attribute(ETAG_ATTRIBUTE, &etag);
                etag
            }
            Err(err) => {
                warn!("{}", err);
                String::new()
            }
        }
    }

    // --- attributes ---

    /// Insert or overwrite an attribute, preserving position on overwrite.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.set_attribute_raw(name, Attribute::string(value));
    }

    pub fn set_attribute_raw(&mut self, name: &str, value: Attribute) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a.value())
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    /// String view of the attribute map.
    pub fn attributes(&self) -> HashMap<String, String> {
        self.attributes
            .iter()
            .map(|(n, a)| (n.clone(), a.value().to_string()))
            .collect()
    }

    /// Replace the whole attribute map.
    pub fn set_attributes(&mut self, attributes: HashMap<String, String>) {
        self.attributes = attributes
            .into_iter()
            .map(|(n, v)| (n, Attribute::Str(v)))
            .collect();
    }
}

fn compute_etag(value: &FieldValue) -> Result<String, TableError> {
    if let FieldValue::Opaque(_) = value {
        return Err(TableError::HashComputation(
            "opaque payloads have no canonical serialization".to_string(),
        ));
    }
    let bytes = serde_json::to_vec(value)
        .map_err(|e| TableError::HashComputation(e.to_string()))?;
    let digest = Sha256::digest(&bytes);
    // 128 bits is plenty for change detection
    Ok(digest[..16].iter().map(|b| format!("{:02x}", b)).collect())
}

/// Payload-only equality, matching the string rendering the comparison
/// surface exposes. Attributes never participate.
impl PartialEq for DataField {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for DataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The wire representation is the payload alone; attributes are internal
/// metadata and stay off the serialized form.
impl Serialize for DataField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl From<FieldValue> for DataField {
    fn from(value: FieldValue) -> Self {
        DataField::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_stable_until_set_value() {
        let mut field = DataField::new(FieldValue::from("hello"));
        let first = field.etag();
        assert!(!first.is_empty());
        assert_eq!(first.len(), 32);
        assert_eq!(field.etag(), first);
        // Cached as an attribute
        assert_eq!(field.attribute(ETAG_ATTRIBUTE), Some(first.as_str()));

        field.set_value(FieldValue::from("world"));
        assert_eq!(field.attribute(ETAG_ATTRIBUTE), None);
        let second = field.etag();
        assert_ne!(second, first);

        // Same payload again reproduces the same fingerprint
        field.set_value(FieldValue::from("hello"));
        assert_eq!(field.etag(), first);
    }

    #[test]
    fn test_etag_opaque_payload_is_empty() {
        let mut field = DataField::new(FieldValue::Opaque("conn#7".into()));
        assert_eq!(field.etag(), "");
        // The failed attempt must not poison the attribute map
        assert_eq!(field.attribute(ETAG_ATTRIBUTE), None);
    }

    #[test]
    fn test_matches_pattern_quoted_and_default_modes() {
        let field = DataField::new(FieldValue::from("Alice"));
        assert!(field.matches_pattern("'Alice'"));
        assert!(field.matches_pattern("ALICE"));

        let padded = DataField::new(FieldValue::from(" alice "));
        assert!(padded.matches_pattern("ALICE"));
        assert!(!padded.matches_pattern_with("ALICE", true, true));
        assert!(!padded.matches_pattern_with("alice", false, false));
    }

    #[test]
    fn test_matches_pattern_integer() {
        let field = DataField::new(FieldValue::Int(42));
        assert!(field.matches_pattern("42"));
        assert!(field.matches_pattern("'42'"));
        assert!(!field.matches_pattern("43"));
        assert!(!field.matches_pattern("forty-two"));
    }

    #[test]
    fn test_matches_pattern_unsupported_kind_is_false() {
        let field = DataField::new(FieldValue::Double(1.0));
        assert!(!field.matches_pattern("1"));
        let field = DataField::new(FieldValue::Bool(true));
        assert!(!field.matches_pattern("true"));
    }

    #[test]
    fn test_attribute_round_trip() {
        let mut field = DataField::new(FieldValue::Int(1));
        field.set_attribute("LABEL", "id");
        field.set_attribute("EDITABLE", "0");
        field.set_attribute("LABEL", "identifier");
        assert_eq!(field.attribute("LABEL"), Some("identifier"));
        assert_eq!(field.attribute("MISSING"), None);
        field.remove_attribute("EDITABLE");
        assert_eq!(field.attribute("EDITABLE"), None);

        let map = field.attributes();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("LABEL").map(String::as_str), Some("identifier"));
    }

    #[test]
    fn test_clone_attributes_are_independent() {
        let mut original = DataField::new(FieldValue::from("x"));
        original.set_attribute("LABEL", "a");
        let mut copy = original.clone();
        copy.set_attribute("LABEL", "b");
        assert_eq!(original.attribute("LABEL"), Some("a"));
        assert_eq!(copy.attribute("LABEL"), Some("b"));
        assert_eq!(original, copy); // payload equality ignores attributes
    }

    #[test]
    fn test_serialization_excludes_attributes() {
        let mut field = DataField::new(FieldValue::Int(5));
        field.set_attribute("LABEL", "id");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json, serde_json::json!({ "Int": 5 }));
    }

    #[test]
    fn test_clear_resets_to_null() {
        let mut field = DataField::new(FieldValue::from("x"));
        field.etag();
        field.clear();
        assert!(field.is_null());
        assert_eq!(field.attribute(ETAG_ATTRIBUTE), None);
        assert_eq!(field.as_str(), "");
    }
}
