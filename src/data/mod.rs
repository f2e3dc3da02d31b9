//! Dynamically-typed tabular data model.
//!
//! Leaf-first: `FieldValue` payloads and the `convert` matrix, `DataField`
//! cells with attributes and fingerprints, `DataRow` ordered field maps,
//! and `DataTable` with scoped projection and join on top.

pub mod convert;
pub mod day_number;
pub mod field;
pub mod join;
pub mod matcher;
pub mod row;
pub mod scope;
pub mod table;
pub mod value;
