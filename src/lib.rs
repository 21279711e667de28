//! csvdb - query a directory of delimited text files
//!
//! Each file in a directory is a table whose first content line is the
//! header. Tables are queried with a small SQL-like subset:
//!
//! ```text
//! SELECT <col[,col...]|*> [WHERE <col> <op> <literal>]
//! ```
//!
//! ```ignore
//! use csvdb::database::Database;
//!
//! let mut db = Database::open("data")?;
//! let people = db.get_table_mut("people").unwrap();
//! let adults = people.query("SELECT name WHERE age >= 18")?;
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod query;
pub mod table;

pub use errors::{CsvError, CsvResult};
