//! CLI command implementations
//!
//! Every command opens the database directory, performs one operation and
//! writes a single JSON response to stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::DatabaseConfig;
use crate::database::Database;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::table::CsvTable;

use super::args::{Cli, Command, DatabaseArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command. Failures are
/// reported as a JSON error response before being returned.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = load_config(cli.config.as_deref(), cli.verbose)
        .and_then(|config| run_command(cli.command, &config));

    if let Err(e) = &result {
        write_error(e.code_str(), &e.to_string())?;
    }
    result
}

/// Loads the configuration file, or defaults when none is given, and
/// applies its log level.
pub fn load_config(path: Option<&Path>, verbose: bool) -> CliResult<DatabaseConfig> {
    let config = match path {
        Some(path) => DatabaseConfig::load(path)?,
        None => DatabaseConfig::default(),
    };

    let severity = if verbose {
        Severity::Info
    } else {
        config.severity()?
    };
    Logger::set_min_severity(severity);

    if let Some(path) = path {
        let display = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", display.as_str())]);
    }

    Ok(config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &DatabaseConfig) -> CliResult<()> {
    let data = match cmd {
        Command::Tables { db } => tables(&db, config)?,
        Command::Query { db, table, query } => run_query(&db, config, &table, &query)?,
        Command::Select {
            db,
            table,
            columns,
            where_column,
            where_value,
        } => select(&db, config, &table, &columns, &where_column, &where_value)?,
        Command::Export { db, table, out } => export(&db, config, &table, &out)?,
    };
    write_response(data)
}

/// Lists every table with its header
pub fn tables(db: &DatabaseArgs, config: &DatabaseConfig) -> CliResult<Value> {
    let database = Database::open_with_config(&db.dir, config)?;

    let tables: Vec<Value> = database
        .iter()
        .map(|table| {
            json!({
                "name": table.name(),
                "columns": table.header(),
                "error": table.last_error(),
            })
        })
        .collect();

    Ok(json!(tables))
}

/// Parses and executes a SELECT expression
pub fn run_query(
    db: &DatabaseArgs,
    config: &DatabaseConfig,
    table: &str,
    query: &str,
) -> CliResult<Value> {
    let mut database = Database::open_with_config(&db.dir, config)?;
    let rows = find_table(&mut database, table)?.query(query)?;
    Ok(json!(rows))
}

/// Positional select; `columns` is comma separated or `*`
pub fn select(
    db: &DatabaseArgs,
    config: &DatabaseConfig,
    table: &str,
    columns: &str,
    where_column: &str,
    where_value: &str,
) -> CliResult<Value> {
    let columns: Vec<&str> = columns.split(',').map(str::trim).collect();

    let mut database = Database::open_with_config(&db.dir, config)?;
    let rows = find_table(&mut database, table)?.select(&columns, where_column, where_value)?;
    Ok(json!(rows))
}

/// Writes a table to `out`
pub fn export(
    db: &DatabaseArgs,
    config: &DatabaseConfig,
    table: &str,
    out: &Path,
) -> CliResult<Value> {
    let mut database = Database::open_with_config(&db.dir, config)?;
    find_table(&mut database, table)?.save(out)?;
    Ok(json!({ "exported": out.display().to_string() }))
}

fn find_table<'a>(database: &'a mut Database, name: &str) -> CliResult<&'a mut CsvTable> {
    database
        .get_table_mut(name)
        .ok_or_else(|| CliError::table_not_found(name))
}
