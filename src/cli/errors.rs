//! Errors surfaced by CLI commands

use std::io;

use thiserror::Error;

use crate::errors::CsvError;

/// Failure of a single CLI invocation
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to write response: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error(transparent)]
    Engine(#[from] CsvError),
}

impl CliError {
    pub fn table_not_found(name: &str) -> Self {
        Self::TableNotFound(name.to_string())
    }

    /// Stable code for the JSON error response.
    ///
    /// Engine failures keep the engine's own code.
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Output(_) | Self::Encode(_) => "CSVDB_CLI_IO_ERROR",
            Self::TableNotFound(_) => "CSVDB_CLI_TABLE_NOT_FOUND",
            Self::Engine(e) => e.code(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
