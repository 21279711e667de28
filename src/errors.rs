//! Error types for csvdb
//!
//! Error codes:
//! - CSVDB_INVALID_DATABASE
//! - CSVDB_UNINITIALIZED_TABLE
//! - CSVDB_UNKNOWN_LABEL
//! - CSVDB_INVALID_ROW
//! - CSVDB_INVALID_ROW_INDEX
//! - CSVDB_INVALID_SELECT_EXPRESSION
//! - CSVDB_SELF_OVERWRITE
//! - CSVDB_INVALID_CONFIG
//! - CSVDB_IO_ERROR
//!
//! Every error is raised to the caller immediately. The only local recovery
//! in the engine is numeric coercion during predicate evaluation, which never
//! produces an error at all.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for csvdb operations
pub type CsvResult<T> = Result<T, CsvError>;

/// Errors raised by tables, queries and databases
#[derive(Debug, Error)]
pub enum CsvError {
    /// Database root is missing or not a directory
    #[error("Invalid database: {0}")]
    InvalidDatabase(String),

    /// Operation attempted before a load succeeded
    #[error("Table file is not open")]
    UninitializedTable,

    /// Referenced column is absent from the header
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Row is too short for the requested column offset
    #[error("Invalid row: expected at least {expected} fields, found {found}")]
    InvalidRow { expected: usize, found: usize },

    /// Offset lies beyond the end of the row
    #[error("Invalid row index: {0}")]
    InvalidRowIndex(usize),

    /// Select expression failed its validity check
    #[error("Invalid select expression: {0}")]
    InvalidSelectExpression(String),

    /// Save target is the table's own backing file
    #[error("Won't write over myself: {}", .0.display())]
    SelfOverwrite(PathBuf),

    /// Configuration file is unreadable or inconsistent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Underlying I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl CsvError {
    /// Wraps an I/O error with a description of what was being attempted
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        CsvError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            CsvError::InvalidDatabase(_) => "CSVDB_INVALID_DATABASE",
            CsvError::UninitializedTable => "CSVDB_UNINITIALIZED_TABLE",
            CsvError::UnknownLabel(_) => "CSVDB_UNKNOWN_LABEL",
            CsvError::InvalidRow { .. } => "CSVDB_INVALID_ROW",
            CsvError::InvalidRowIndex(_) => "CSVDB_INVALID_ROW_INDEX",
            CsvError::InvalidSelectExpression(_) => "CSVDB_INVALID_SELECT_EXPRESSION",
            CsvError::SelfOverwrite(_) => "CSVDB_SELF_OVERWRITE",
            CsvError::InvalidConfig(_) => "CSVDB_INVALID_CONFIG",
            CsvError::Io { .. } => "CSVDB_IO_ERROR",
        }
    }
}
