//! Table subsystem for csvdb
//!
//! A table is one delimited text file. Its first line that is neither a
//! comment nor blank is the header; every later such line is a row.
//!
//! # Row format
//!
//! - Fields are split on a configurable delimiter (default `,`)
//! - Double quotes protect delimiters and are kept in the field
//! - Lines starting with the comment marker (default `#`) are skipped
//! - Lines starting with `\r` or `\n` are skipped
//! - Fields are trimmed after splitting

mod delimit;
mod header;
mod table;

pub use delimit::{split_fields, split_trimmed, DOUBLE_QUOTE};
pub use header::HeaderIndex;
pub use table::{CsvTable, Rows};

use crate::errors::CsvResult;

/// One row: raw string fields in header order
pub type Row = Vec<String>;

/// Line-ending characters; a line starting with one of them is blank
pub const EOL: &[char] = &['\r', '\n'];

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default comment marker
pub const DEFAULT_COMMENT: char = '#';

/// Delimiter and comment marker for a table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: char,
    pub comment: char,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            comment: DEFAULT_COMMENT,
        }
    }
}

/// What the query engine needs from a table.
///
/// Row iteration is restartable through `reset`.
pub trait TableSource {
    /// Header labels in column order
    fn header(&self) -> &[String];

    /// Offset of `label` in the header
    fn header_index(&self, label: &str) -> Option<usize>;

    /// Next content row, or `None` at end of input
    fn next_row(&mut self) -> CsvResult<Option<Row>>;

    /// Restart row iteration at the first row after the header
    fn reset(&mut self) -> CsvResult<()>;
}
