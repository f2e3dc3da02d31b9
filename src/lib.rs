//! tablekit: an in-memory, dynamically-typed tabular data model.
//!
//! Moves and transforms relational data between heterogeneous sources
//! without committing to a schema at compile time. The core is the typed
//! cell (`DataField`) with its coercion matrix, attribute metadata and
//! content fingerprint, composed into rows and tables with scoped field
//! projection and left join. No I/O lives here; collaborators hand in
//! already-materialized values.

pub mod data;
pub mod error;
pub mod logging;
pub mod trace;

pub use data::field::{Attribute, DataField, ETAG_ATTRIBUTE};
pub use data::join::left_join;
pub use data::matcher::{PatternRowMatcher, RegexRowMatcher, RowMatcher, SimpleRowMatcher};
pub use data::row::DataRow;
pub use data::scope::{FieldSelection, ScopeDef};
pub use data::table::DataTable;
pub use data::value::FieldValue;
pub use error::TableError;
