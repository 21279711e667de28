//! Query Executor subsystem for csvdb
//!
//! The executor streams rows from a `TableSource` and produces projected
//! results in file order.
//!
//! # Entry points
//!
//! - Positional select: `(columns, where_column, where_value)` with exact
//!   string equality, `"*"` meaning all columns or all rows
//! - Expression select: a validated `SelectExpression` with one
//!   `=`, `<`, `<=`, `>` or `>=` predicate
//!
//! Both reset the table before scanning.

mod executor;
mod result;

pub use executor::{QueryExecutor, ALL_ROWS};
pub use result::{distinct_first_column, ExecutionResult};
