use crate::data::row::DataRow;

/// Named, ordered subsets of column names used to restrict projection.
///
/// Definition order of the scopes does not matter; resolution order is
/// driven entirely by the key and each scope's own column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeDef {
    scopes: Vec<(String, Vec<String>)>,
}

impl ScopeDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a named scope.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let name = name.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        match self.scopes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = columns,
            None => self.scopes.push((name, columns)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.scopes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_slice())
    }

    pub fn names(&self) -> Vec<&str> {
        self.scopes.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Resolve a scope key into a column list. The key is read character
    /// by character as single scope names; their column lists are unioned
    /// in first-seen order, duplicates collapse to the first occurrence.
    /// Unknown letters contribute nothing.
    pub fn resolve(&self, key: &str) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for ch in key.chars() {
            let name = ch.to_string();
            if let Some(scope) = self.get(&name) {
                for column in scope {
                    if !columns.contains(column) {
                        columns.push(column.clone());
                    }
                }
            }
        }
        columns
    }
}

/// An explicit ordered column list, independent of any scope table.
/// When both are set on a table, the selection wins over the scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSelection {
    columns: Vec<String>,
}

impl FieldSelection {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut selection = Self::default();
        for column in columns {
            let column = column.into();
            if !selection.columns.contains(&column) {
                selection.columns.push(column);
            }
        }
        selection
    }

    /// Build a selection from a row's field names, the shape a caller gets
    /// from a template row.
    pub fn from_row(row: &DataRow) -> Self {
        Self::new(row.field_names())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}
