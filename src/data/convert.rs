//! Conversion matrix between payload kinds.
//!
//! These are not generic numeric promotions; several branches reproduce
//! compatibility shims for historical callers (the unsigned int-to-long
//! widening, the substring boolean parse). Every function is pure and a
//! missing (source, target) pair fails with `TypeMismatch`, which callers
//! absorb into empty / false results.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::data::day_number::date_from_day_number;
use crate::data::value::FieldValue;
use crate::error::TableError;

/// The literal recognized by the string-to-boolean shim. Any string that
/// occurs as a substring of it (including the empty string) reads as true.
const TRUTHY_LITERAL: &str = "trueTRUE1";

fn mismatch(from: &FieldValue, to: &'static str) -> TableError {
    TableError::TypeMismatch {
        from: from.type_name(),
        to,
    }
}

/// Total string rendering; `Null` renders empty, no rule ever fails.
pub fn to_display_string(value: &FieldValue) -> String {
    value.to_string()
}

pub fn to_bool(value: &FieldValue) -> Result<bool, TableError> {
    match value {
        FieldValue::Bool(b) => Ok(*b),
        FieldValue::Short(n) => Ok(*n > 0),
        FieldValue::Int(n) => Ok(*n > 0),
        FieldValue::Long(n) => Ok(*n > 0),
        FieldValue::Decimal(n) | FieldValue::Double(n) => Ok(*n > 0.0),
        FieldValue::Float(n) => Ok(*n > 0.0),
        // Substring shim: recognizes "true", "TRUE", "1" and substrings
        // thereof, not a general truthy parse
        FieldValue::Str(s) => Ok(TRUTHY_LITERAL.contains(s.as_str())),
        other => Err(mismatch(other, "boolean")),
    }
}

pub fn to_int(value: &FieldValue) -> Result<i32, TableError> {
    match value {
        FieldValue::Int(n) => Ok(*n),
        FieldValue::Short(n) => Ok(i32::from(*n)),
        FieldValue::Long(n) => Ok(*n as i32), // truncates
        other => Err(mismatch(other, "integer")),
    }
}

pub fn to_long(value: &FieldValue) -> Result<i64, TableError> {
    match value {
        FieldValue::Long(n) => Ok(*n),
        // Widens through the unsigned bit pattern: negative ints map to
        // their two's-complement value, kept for legacy STR() callers
        FieldValue::Int(n) => Ok(i64::from(*n as u32)),
        FieldValue::Short(n) => Ok(i64::from(*n)),
        other => Err(mismatch(other, "long")),
    }
}

pub fn to_short(value: &FieldValue) -> Result<i16, TableError> {
    match value {
        FieldValue::Short(n) => Ok(*n),
        FieldValue::Int(n) => Ok(*n as i16), // truncates
        other => Err(mismatch(other, "short")),
    }
}

pub fn to_decimal(value: &FieldValue) -> Result<f64, TableError> {
    match value {
        FieldValue::Decimal(n) => Ok(*n),
        FieldValue::Double(n) => Ok(*n),
        other => Err(mismatch(other, "decimal")),
    }
}

pub fn to_double(value: &FieldValue) -> Result<f64, TableError> {
    match value {
        FieldValue::Double(n) => Ok(*n),
        other => Err(mismatch(other, "double")),
    }
}

pub fn to_float(value: &FieldValue) -> Result<f32, TableError> {
    match value {
        FieldValue::Float(n) => Ok(*n),
        FieldValue::Double(n) => Ok(*n as f32),
        other => Err(mismatch(other, "float")),
    }
}

/// Date conversion. `Ok(None)` models the empty date: out-of-range day
/// numbers and the string sentinels `""` / `"-1"` yield no date rather
/// than an error.
pub fn to_date(value: &FieldValue) -> Result<Option<NaiveDate>, TableError> {
    match value {
        FieldValue::Date(d) => Ok(Some(*d)),
        // Same instant, different representation tag; no timezone math
        FieldValue::Timestamp(ts) => Ok(Some(ts.date())),
        FieldValue::Int(n) => Ok(date_from_day_number(*n)),
        FieldValue::Double(n) => Ok(date_from_day_number(n.trunc() as i32)),
        FieldValue::Str(s) if s.is_empty() || s == "-1" => Ok(None),
        other => Err(mismatch(other, "date")),
    }
}

pub fn to_time(value: &FieldValue) -> Result<Option<NaiveTime>, TableError> {
    match value {
        FieldValue::Time(t) => Ok(Some(*t)),
        other => Err(mismatch(other, "time")),
    }
}

pub fn to_timestamp(value: &FieldValue) -> Result<Option<NaiveDateTime>, TableError> {
    match value {
        FieldValue::Timestamp(ts) => Ok(Some(*ts)),
        // Midnight of the same calendar day, same epoch millis
        FieldValue::Date(d) => Ok(Some(d.and_time(NaiveTime::MIN))),
        FieldValue::Str(s) if s.is_empty() => Ok(None),
        other => Err(mismatch(other, "timestamp")),
    }
}

pub fn to_bytes(value: &FieldValue) -> Result<&[u8], TableError> {
    match value {
        FieldValue::Bytes(b) => Ok(b),
        other => Err(mismatch(other, "bytes")),
    }
}

/// String equality used by `matches_pattern`: optional trim on the stored
/// side, case-sensitive or folded compare. The fold is Unicode-aware, so
/// non-ASCII data compares the same way as ASCII.
pub fn compare_string(stored: &str, pattern: &str, case_sensitive: bool, trimmed: bool) -> bool {
    let stored = if trimmed { stored.trim() } else { stored };
    if case_sensitive {
        stored == pattern
    } else {
        stored.to_lowercase() == pattern.to_lowercase()
    }
}
