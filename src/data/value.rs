use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// A single typed cell payload.
///
/// Exactly one variant is active at a time; `Null` models an explicitly
/// empty payload. Anything outside the closed set travels as `Opaque`,
/// an uninterpreted reference token that no conversion rule accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    Decimal(f64),
    Double(f64),
    Float(f32),
    Str(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
    Opaque(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Stable variant tag used in diagnostics and error payloads.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Short(_) => "short",
            FieldValue::Int(_) => "integer",
            FieldValue::Long(_) => "long",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Double(_) => "double",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::Date(_) => "date",
            FieldValue::Time(_) => "time",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Opaque(_) => "opaque",
        }
    }

    /// Convert a raw JSON value into a payload, the way a row
    /// materialization boundary sees it.
    ///
    /// Integers that fit in 32 bits land as `Int`, wider ones as `Long`.
    /// Strings matching common date / timestamp layouts are promoted;
    /// arrays and objects are kept as their JSON text.
    pub fn from_json(json: &JsonValue) -> FieldValue {
        match json {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(v) => FieldValue::Int(v),
                        Err(_) => FieldValue::Long(i),
                    }
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Double(f)
                } else {
                    FieldValue::Str(n.to_string())
                }
            }
            JsonValue::String(s) => {
                if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                    FieldValue::Timestamp(ts)
                } else if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                    FieldValue::Timestamp(ts)
                } else if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    FieldValue::Date(d)
                } else {
                    FieldValue::Str(s.clone())
                }
            }
            // Complex types are carried as their JSON text
            JsonValue::Array(_) | JsonValue::Object(_) => FieldValue::Str(json.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Short(n) => write!(f, "{}", n),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Long(n) => write!(f, "{}", n),
            FieldValue::Decimal(n) => write!(f, "{}", n),
            FieldValue::Double(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Time(t) => write!(f, "{}", t),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts),
            FieldValue::Bytes(b) => {
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            FieldValue::Opaque(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Long(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Double(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}
