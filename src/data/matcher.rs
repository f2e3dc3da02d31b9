use anyhow::Result;
use regex::Regex;

use crate::data::row::DataRow;

/// A single-field predicate over rows, the building block for filtering.
///
/// Implementations are total: a row that lacks the named field simply does
/// not match, so bulk scans never abort on a sparse row.
pub trait RowMatcher {
    fn field_name(&self) -> &str;
    fn matches(&self, row: &DataRow) -> bool;
}

/// Exact match against the field's string rendering. Field lookup is
/// case-insensitive on the name, the value compare is exact.
pub struct SimpleRowMatcher {
    field_name: String,
    criteria: String,
}

impl SimpleRowMatcher {
    pub fn new(field_name: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            criteria: criteria.into(),
        }
    }
}

impl RowMatcher for SimpleRowMatcher {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn matches(&self, row: &DataRow) -> bool {
        row.field_ci(&self.field_name)
            .map(|f| f.as_str() == self.criteria)
            .unwrap_or(false)
    }
}

/// Regex match over the field's string rendering.
pub struct RegexRowMatcher {
    field_name: String,
    pattern: Regex,
}

impl RegexRowMatcher {
    pub fn new(field_name: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self {
            field_name: field_name.into(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl RowMatcher for RegexRowMatcher {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn matches(&self, row: &DataRow) -> bool {
        row.field_ci(&self.field_name)
            .map(|f| self.pattern.is_match(&f.as_str()))
            .unwrap_or(false)
    }
}

/// Equality-predicate match using the field's own comparison semantics
/// (quote stripping, case and trim modes, unsupported kinds resolve to
/// false).
pub struct PatternRowMatcher {
    field_name: String,
    pattern: String,
    case_sensitive: bool,
    trimmed: bool,
}

impl PatternRowMatcher {
    pub fn new(field_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::with_modes(field_name, pattern, false, true)
    }

    pub fn with_modes(
        field_name: impl Into<String>,
        pattern: impl Into<String>,
        case_sensitive: bool,
        trimmed: bool,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            pattern: pattern.into(),
            case_sensitive,
            trimmed,
        }
    }
}

impl RowMatcher for PatternRowMatcher {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn matches(&self, row: &DataRow) -> bool {
        row.field_ci(&self.field_name)
            .map(|f| f.matches_pattern_with(&self.pattern, self.case_sensitive, self.trimmed))
            .unwrap_or(false)
    }
}
