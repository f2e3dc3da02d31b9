use tracing::debug;

use crate::data::row::DataRow;
use crate::data::table::DataTable;

/// Left join of two tables on shared key columns.
///
/// Keys compare by value (string rendering, trimmed, case-insensitive),
/// not identity. Every left row appears at least once; a row with no match
/// keeps only its own columns. Multiple right matches multiply out to one
/// output row per match, left order outer, right match order inner.
///
/// Collision policy: a non-key right column whose name already exists on
/// the left lands under `"<right table name>.<column>"`; key columns keep
/// the left value. An unnamed right table namespaces under `"right"` so
/// the prefix never degenerates to a bare dot.
pub fn left_join(left: &DataTable, right: &DataTable, key_columns: &[&str]) -> DataTable {
    let right_prefix = if right.name.is_empty() {
        "right"
    } else {
        right.name.as_str()
    };

    let mut result = DataTable::new(format!("{}_{}", left.name, right.name));
    for column in left.column_names() {
        result.declare_column(column.clone());
    }
    for column in right.column_names() {
        if key_columns.contains(&column.as_str()) {
            continue;
        }
        if left.column_names().contains(column) {
            result.declare_column(format!("{}.{}", right_prefix, column));
        } else {
            result.declare_column(column.clone());
        }
    }

    for left_row in left.rows() {
        let matches: Vec<&DataRow> = right
            .rows()
            .filter(|right_row| keys_match(left_row, right_row, key_columns))
            .collect();

        if matches.is_empty() {
            result.add_row(left_row.clone());
            continue;
        }
        for right_row in matches {
            let mut joined = left_row.clone();
            for (name, field) in right_row.iter() {
                if key_columns.contains(&name) {
                    continue;
                }
                if left.column_names().iter().any(|c| c == name) {
                    joined.set_field(format!("{}.{}", right_prefix, name), field.clone());
                } else {
                    joined.set_field(name, field.clone());
                }
            }
            result.add_row(joined);
        }
    }

    debug!(
        "left_join '{}' x '{}' on {:?}: {} rows",
        left.name,
        right.name,
        key_columns,
        result.row_count()
    );
    result
}

/// A left row missing a key column never matches; both sides must render
/// equal on every key.
fn keys_match(left_row: &DataRow, right_row: &DataRow, key_columns: &[&str]) -> bool {
    key_columns.iter().all(|key| {
        match (left_row.field(key), right_row.field(key)) {
            (Ok(l), Ok(r)) => values_equal(&l.as_str(), &r.as_str()),
            _ => false,
        }
    })
}

// Unicode-aware fold, matching the comparison surface fields expose
fn values_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
