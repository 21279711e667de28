//! Query subsystem for csvdb
//!
//! Supported query surface:
//!
//! ```text
//! SELECT <col[,col...]|*> [WHERE <col> <op> <literal>]
//! ```
//!
//! where `<op>` is one of `=`, `<`, `<=`, `>`, `>=`. Keywords may be all
//! uppercase or all lowercase; column names and literals are case-sensitive.
//!
//! # Components
//!
//! - `operator`: comparison operators and their search order
//! - `expression`: substring-based parsing into a `SelectExpression`
//! - `matcher`: integer → float → string coercing predicate evaluation

mod expression;
mod matcher;
mod operator;

pub use expression::{
    SelectExpression, ALL_COLUMNS, SELECT_LOWER, SELECT_UPPER, WHERE_LOWER, WHERE_UPPER,
};
pub use matcher::{check_match, Comparison};
pub use operator::ComparisonOp;
