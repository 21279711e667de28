//! CLI module for csvdb
//!
//! Provides command-line interface for:
//! - tables: List tables and headers
//! - query: Execute a SELECT expression
//! - select: Positional select with exact matching
//! - export: Write a table to another file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DatabaseArgs};
pub use commands::{export, load_config, run, run_command, run_query, select, tables};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_response};
