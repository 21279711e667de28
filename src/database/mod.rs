//! Database subsystem for csvdb
//!
//! A database is a directory; each file carrying the configured extension
//! (default `.csv`) is a table named after the file.

mod database;

pub use database::Database;
