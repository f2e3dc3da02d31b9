use thiserror::Error;

/// Error taxonomy for the tabular core.
///
/// Conversion and comparison failures are recoverable by contract: bulk
/// row-scanning operations (filtering, joining) absorb them into sentinel
/// results and never abort mid-scan. `FieldNotFound` is the one structural
/// failure surfaced to the caller, so "absent" stays distinguishable from
/// "present but empty".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no conversion from {from} to {to}")]
    TypeMismatch {
        from: &'static str,
        to: &'static str,
    },

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("unsupported comparison for field type {0}")]
    UnsupportedComparison(&'static str),

    #[error("fingerprint computation failed: {0}")]
    HashComputation(String),
}

impl TableError {
    pub fn field_not_found(name: impl Into<String>) -> Self {
        TableError::FieldNotFound(name.into())
    }
}
