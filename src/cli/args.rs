//! CLI argument definitions using clap
//!
//! Commands:
//! - csvdb tables --dir <path>
//! - csvdb query --dir <path> --table <name> "<SELECT ...>"
//! - csvdb select --dir <path> --table <name> --columns <a,b|*> [--where-column <c>] [--where-value <v|*>]
//! - csvdb export --dir <path> --table <name> --out <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// csvdb - query a directory of delimited text files
#[derive(Parser, Debug)]
#[command(name = "csvdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at INFO level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Database location shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tables and their headers
    Tables {
        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Run a SELECT expression against one table
    Query {
        #[command(flatten)]
        db: DatabaseArgs,

        /// Table name (file name without extension)
        #[arg(long)]
        table: String,

        /// Query text, e.g. "SELECT name WHERE age >= 18"
        query: String,
    },

    /// Positional select with exact-match filtering
    Select {
        #[command(flatten)]
        db: DatabaseArgs,

        /// Table name (file name without extension)
        #[arg(long)]
        table: String,

        /// Comma-separated columns, or * for all
        #[arg(long, default_value = "*")]
        columns: String,

        /// Column compared against --where-value
        #[arg(long, default_value = "*")]
        where_column: String,

        /// Required value, or * for every row
        #[arg(long, default_value = "*")]
        where_value: String,
    },

    /// Write a table to another file
    Export {
        #[command(flatten)]
        db: DatabaseArgs,

        /// Table name (file name without extension)
        #[arg(long)]
        table: String,

        /// Destination path
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
