//! Table query executor for csvdb
//!
//! Execution flow (both entry points):
//! 1. Resolve projected and WHERE column offsets against the header
//! 2. Reset the table so rows are read from the first content line
//! 3. Test each row (equality, or the expression's predicate)
//! 4. Project matching rows to the selected offsets
//! 5. Return rows in file order
//!
//! Because every execution starts with a reset, running the same selection
//! twice on an unchanged file returns the same rows.

use crate::errors::{CsvError, CsvResult};
use crate::observability::{log_event_with_fields, Event};
use crate::query::{SelectExpression, ALL_COLUMNS};
use crate::table::{CsvTable, Row, TableSource};

use super::result::ExecutionResult;

/// WHERE value that selects every row in a positional select
pub const ALL_ROWS: &str = "*";

/// Executes selections against a table
pub struct QueryExecutor<'a, T: TableSource + ?Sized> {
    table: &'a mut T,
}

impl<'a, T: TableSource + ?Sized> QueryExecutor<'a, T> {
    /// Creates a new executor over `table`
    pub fn new(table: &'a mut T) -> Self {
        Self { table }
    }

    /// Positional select.
    ///
    /// `columns` starting with `"*"` keeps whole rows. `where_value == "*"`
    /// keeps every row; otherwise a row is kept when its `where_column`
    /// field equals `where_value` exactly.
    pub fn select(
        &mut self,
        columns: &[&str],
        where_column: &str,
        where_value: &str,
    ) -> CsvResult<ExecutionResult> {
        let offsets = if columns.first() == Some(&ALL_COLUMNS) {
            None
        } else {
            Some(self.resolve_all(columns.iter().copied())?)
        };
        let where_offset = if where_value == ALL_ROWS {
            None
        } else {
            Some(self.resolve(where_column)?)
        };

        let (rows, scanned) = self.scan(|row| match where_offset {
            None => Ok(true),
            Some(offset) => Ok(field(row, offset)? == where_value),
        })?;
        let rows = match offsets {
            None => rows,
            Some(offsets) => rows
                .iter()
                .map(|row| project(row, &offsets))
                .collect::<CsvResult<Vec<_>>>()?,
        };

        Ok(ExecutionResult {
            rows,
            scanned_count: scanned,
        })
    }

    /// Executes a parsed select expression.
    ///
    /// Fails with `InvalidSelectExpression` (carrying the query text) when
    /// the expression is not valid. Without a WHERE column, or with one that
    /// is not in the header, every row matches.
    pub fn execute(&mut self, expression: &SelectExpression) -> CsvResult<ExecutionResult> {
        if !expression.is_valid() {
            log_event_with_fields(Event::QueryRejected, &[("query", expression.text())]);
            return Err(CsvError::InvalidSelectExpression(
                expression.text().to_string(),
            ));
        }

        // A WHERE column missing from the header matches every row
        let where_offset = expression
            .where_column()
            .and_then(|column| self.table.header_index(column));
        let offsets = self.resolve_all(expression.select_columns().iter().map(String::as_str))?;

        let (rows, scanned) = self.scan(|row| match where_offset {
            None => Ok(true),
            Some(offset) => Ok(expression.check_match(field(row, offset)?)),
        })?;
        let rows = rows
            .iter()
            .map(|row| project(row, &offsets))
            .collect::<CsvResult<Vec<_>>>()?;

        let scanned_str = scanned.to_string();
        let returned_str = rows.len().to_string();
        log_event_with_fields(
            Event::QueryComplete,
            &[
                ("query", expression.text()),
                ("returned", returned_str.as_str()),
                ("scanned", scanned_str.as_str()),
            ],
        );

        Ok(ExecutionResult {
            rows,
            scanned_count: scanned,
        })
    }

    fn resolve(&self, label: &str) -> CsvResult<usize> {
        self.table
            .header_index(label)
            .ok_or_else(|| CsvError::UnknownLabel(label.to_string()))
    }

    fn resolve_all<'c>(&self, labels: impl Iterator<Item = &'c str>) -> CsvResult<Vec<usize>> {
        labels.map(|label| self.resolve(label)).collect()
    }

    /// Resets the table and keeps every row accepted by `keep`.
    fn scan<F>(&mut self, mut keep: F) -> CsvResult<(Vec<Row>, usize)>
    where
        F: FnMut(&Row) -> CsvResult<bool>,
    {
        self.table.reset()?;

        let mut kept = Vec::new();
        let mut scanned = 0;
        while let Some(row) = self.table.next_row()? {
            scanned += 1;
            if keep(&row)? {
                kept.push(row);
            }
        }
        Ok((kept, scanned))
    }
}

/// Field at `offset`, failing with `InvalidRow` when the row is too short
fn field(row: &Row, offset: usize) -> CsvResult<&str> {
    row.get(offset)
        .map(String::as_str)
        .ok_or(CsvError::InvalidRow {
            expected: offset + 1,
            found: row.len(),
        })
}

fn project(row: &Row, offsets: &[usize]) -> CsvResult<Row> {
    offsets
        .iter()
        .map(|offset| field(row, *offset).map(str::to_string))
        .collect()
}

impl CsvTable {
    /// Positional select; see [`QueryExecutor::select`]
    pub fn select(
        &mut self,
        columns: &[&str],
        where_column: &str,
        where_value: &str,
    ) -> CsvResult<Vec<Row>> {
        QueryExecutor::new(self)
            .select(columns, where_column, where_value)
            .map(ExecutionResult::into_rows)
    }

    /// Expression-based select; see [`QueryExecutor::execute`]
    pub fn select_with_expression(&mut self, expression: &SelectExpression) -> CsvResult<Vec<Row>> {
        QueryExecutor::new(self)
            .execute(expression)
            .map(ExecutionResult::into_rows)
    }

    /// Parses `text` against this table's header and executes it
    pub fn query(&mut self, text: &str) -> CsvResult<Vec<Row>> {
        let expression = SelectExpression::parse(text, &*self);
        log_event_with_fields(Event::QueryParsed, &[("query", text)]);
        self.select_with_expression(&expression)
    }
}
