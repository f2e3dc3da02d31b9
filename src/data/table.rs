use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::debug;

use crate::data::matcher::RowMatcher;
use crate::data::row::DataRow;
use crate::data::scope::{FieldSelection, ScopeDef};
use crate::data::value::FieldValue;

/// An ordered sequence of rows sharing a nominal column set.
///
/// `column_order` is the first-seen union of field names across the added
/// rows (or a pre-declared list) and serves consumers that need a stable
/// column list independent of any one row. Rows may legitimately omit a
/// column absent from their source; absence is not a null value.
///
/// Mutation is not internally synchronized; a shared table must be
/// serialized by the caller. Read paths are safe on a table that is not
/// concurrently mutated.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub name: String,
    rows: Vec<DataRow>,
    column_order: Vec<String>,
    pub metadata: HashMap<String, String>,
    scope_def: ScopeDef,
    scope: Option<String>,
    field_selection: Option<FieldSelection>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pre-declare a column; harmless if it was already seen.
    pub fn declare_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.column_order.contains(&name) {
            self.column_order.push(name);
        }
    }

    /// Append a row, merging its unseen field names into the declared
    /// column order.
    pub fn add_row(&mut self, row: DataRow) {
        for name in row.field_names() {
            self.declare_column(name);
        }
        self.rows.push(row);
    }

    pub fn row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get_value_by_name(&self, row: usize, column: &str) -> Option<&FieldValue> {
        self.rows.get(row)?.field_value(column).ok()
    }

    // --- scope & field selection ---

    pub fn set_scope_def(&mut self, scope_def: ScopeDef) {
        self.scope_def = scope_def;
    }

    pub fn scope_def(&self) -> &ScopeDef {
        &self.scope_def
    }

    pub fn set_scope(&mut self, key: impl Into<String>) {
        self.scope = Some(key.into());
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn clear_scope(&mut self) {
        self.scope = None;
    }

    pub fn set_field_selection(&mut self, selection: FieldSelection) {
        self.field_selection = Some(selection);
    }

    pub fn field_selection(&self) -> Option<&FieldSelection> {
        self.field_selection.as_ref()
    }

    pub fn clear_field_selection(&mut self) {
        self.field_selection = None;
    }

    /// True iff the name appears in the active scope's resolved column
    /// set. Absent input and absent scope both resolve to false.
    pub fn is_field_in_scope(&self, name: Option<&str>) -> bool {
        let (Some(name), Some(scope)) = (name, self.scope.as_deref()) else {
            return false;
        };
        self.scope_def.resolve(scope).iter().any(|c| c == name)
    }

    /// The column list a retrieval would return right now: the field
    /// selection when set, else the resolved scope, else all declared
    /// columns.
    pub fn active_columns(&self) -> Vec<String> {
        if let Some(selection) = &self.field_selection {
            return selection.columns().to_vec();
        }
        if let Some(scope) = self.scope.as_deref() {
            return self.scope_def.resolve(scope);
        }
        self.column_order.clone()
    }

    /// Project the table onto the active column list. Rows lacking a
    /// projected column omit it silently (sparse result, no error). With
    /// neither scope nor selection set this is a plain copy.
    pub fn retrieve(&self) -> DataTable {
        let columns = self.active_columns();
        debug!(
            "retrieve '{}': {} rows onto {} columns",
            self.name,
            self.rows.len(),
            columns.len()
        );

        let mut result = DataTable::new(self.name.clone());
        result.metadata = self.metadata.clone();
        for column in &columns {
            result.declare_column(column.clone());
        }
        for row in &self.rows {
            let mut projected = DataRow::new();
            for column in &columns {
                if let Ok(field) = row.field(column) {
                    projected.set_field(column.clone(), field.clone());
                }
            }
            result.rows.push(projected);
        }
        result
    }

    /// Rows accepted by the matcher, as a new table with the same declared
    /// columns. The scan is total: unsupported comparisons and sparse rows
    /// simply do not match.
    pub fn filter(&self, matcher: &dyn RowMatcher) -> DataTable {
        let mut result = DataTable::new(self.name.clone());
        result.metadata = self.metadata.clone();
        for column in &self.column_order {
            result.declare_column(column.clone());
        }
        for row in &self.rows {
            if matcher.matches(row) {
                result.rows.push(row.clone());
            }
        }
        result
    }

    /// Summary string for diagnostics.
    pub fn debug_dump(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "DataTable: {}", self.name);
        let _ = writeln!(
            output,
            "Rows: {} | Columns: {}",
            self.row_count(),
            self.column_count()
        );
        if !self.metadata.is_empty() {
            let _ = writeln!(output, "Metadata:");
            for (key, value) in &self.metadata {
                let _ = writeln!(output, "  {}: {}", key, value);
            }
        }
        let _ = writeln!(output, "Columns: {}", self.column_order.join(", "));
        for (idx, row) in self.rows.iter().take(5).enumerate() {
            let cells: Vec<String> = self
                .column_order
                .iter()
                .map(|c| {
                    row.field(c)
                        .map(|f| f.as_str())
                        .unwrap_or_else(|_| "<absent>".to_string())
                })
                .collect();
            let _ = writeln!(output, "  [{}]: {}", idx, cells.join(", "));
        }
        output
    }
}

/// Tables serialize as name, columns and rows; projection config and
/// metadata are runtime state, not part of the wire shape.
impl Serialize for DataTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DataTable", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("columns", &self.column_order)?;
        state.serialize_field("rows", &self.rows)?;
        state.end()
    }
}
