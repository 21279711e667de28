//! Result types for query execution

use crate::table::Row;

/// Rows selected by one execution, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Projected rows
    pub rows: Vec<Row>,
    /// Number of rows read from the table
    pub scanned_count: usize,
}

impl ExecutionResult {
    /// Creates an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no rows matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of selected rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns an iterator over the selected rows
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Consumes the result, returning the rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// First value of every row, deduplicated in first-seen order.
///
/// Intended for single-column selections. Rows with no fields are skipped.
pub fn distinct_first_column(rows: &[Row]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in rows.iter().filter_map(|row| row.first()) {
        if !distinct.contains(value) {
            distinct.push(value.clone());
        }
    }
    distinct
}
