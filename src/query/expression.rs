//! Select expression parsing
//!
//! The query string is not tokenized. Keywords and operators are located by
//! substring search and the regions between them are sliced out:
//!
//! ```text
//! SELECT <columns> WHERE <column> <op> <literal>
//!       ^         ^     ^        ^    ^
//!       |         |     |        |    literal start
//!       |         |     |        operator offset
//!       |         |     where column start
//!       |         where keyword start (end of columns)
//!       columns start
//! ```
//!
//! Each keyword is searched in uppercase and then in lowercase; when both
//! spellings occur the lowercase match wins. The operator is the first of
//! `<=`, `>=`, `<`, `>`, `=` that occurs anywhere in the text, not only
//! inside the WHERE clause.
//!
//! Parsing never fails. Semantic problems are reported by `is_valid`.

use super::operator::ComparisonOp;
use crate::table::TableSource;

pub const SELECT_UPPER: &str = "SELECT";
pub const SELECT_LOWER: &str = "select";
pub const WHERE_UPPER: &str = "WHERE";
pub const WHERE_LOWER: &str = "where";

/// Column expression selecting every header column
pub const ALL_COLUMNS: &str = "*";

/// A parsed, possibly invalid, select expression bound to a table header
#[derive(Debug, Clone, PartialEq)]
pub struct SelectExpression {
    /// Original query text
    text: String,
    /// Header of the table the expression was parsed against
    header: Vec<String>,
    select_found: bool,
    /// Trimmed text between SELECT and WHERE (or end of input)
    column_expression: String,
    /// Selected columns, expanded to the full header for `*`
    columns: Vec<String>,
    where_found: bool,
    where_column: Option<String>,
    operator: Option<ComparisonOp>,
    where_value: Option<String>,
}

impl SelectExpression {
    /// Parses `text` against the header of `table`.
    pub fn parse<T>(text: impl Into<String>, table: &T) -> Self
    where
        T: TableSource + ?Sized,
    {
        Self::parse_with_header(text, table.header())
    }

    /// Parses `text` against an explicit header.
    pub fn parse_with_header(text: impl Into<String>, header: &[String]) -> Self {
        let text = text.into();

        let select = find_keyword(&text, SELECT_UPPER, SELECT_LOWER);
        let where_clause = find_keyword(&text, WHERE_UPPER, WHERE_LOWER);
        let operator = ComparisonOp::find_in(&text);

        let where_value = operator.map(|(op, offset)| {
            let literal_start = offset + op.symbol().len();
            text[literal_start..].trim().to_string()
        });

        let where_column = match (where_clause, operator) {
            (Some((_, where_end)), Some((_, operator_offset))) if operator_offset > where_end => {
                Some(region(&text, where_end, operator_offset).to_string())
            }
            _ => None,
        };

        // Without SELECT there is no column region
        let column_expression = match (select, where_clause) {
            (None, _) => "",
            (Some((_, columns_start)), Some((where_start, _))) => {
                region(&text, columns_start, where_start)
            }
            (Some((_, columns_start)), None) => text[columns_start..].trim(),
        }
        .to_string();

        let columns = if select.is_none() {
            Vec::new()
        } else if column_expression == ALL_COLUMNS {
            header.to_vec()
        } else {
            column_expression
                .split(',')
                .map(|part| part.trim().to_string())
                .collect()
        };

        Self {
            header: header.to_vec(),
            select_found: select.is_some(),
            column_expression,
            columns,
            where_found: where_clause.is_some(),
            where_column,
            operator: operator.map(|(op, _)| op),
            where_value,
            text,
        }
    }

    /// Checks the expression against the header it was parsed with.
    ///
    /// Invalid when no SELECT keyword was found, when a selected column is
    /// not in the header (unless `*`), or when a WHERE clause lacks an
    /// operator or literal.
    pub fn is_valid(&self) -> bool {
        if !self.select_found {
            return false;
        }
        if !self.is_all_columns() && !self.columns.iter().all(|c| self.header.contains(c)) {
            return false;
        }
        if self.where_found && (self.operator.is_none() || self.where_value.is_none()) {
            return false;
        }
        true
    }

    /// Selected columns in output order
    pub fn select_columns(&self) -> &[String] {
        &self.columns
    }

    /// Column tested by the WHERE predicate
    pub fn where_column(&self) -> Option<&str> {
        self.where_column.as_deref()
    }

    pub fn operator(&self) -> Option<ComparisonOp> {
        self.operator
    }

    /// Literal the WHERE column is compared against
    pub fn where_value(&self) -> Option<&str> {
        self.where_value.as_deref()
    }

    /// The original query text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn column_expression(&self) -> &str {
        &self.column_expression
    }

    pub fn has_select(&self) -> bool {
        self.select_found
    }

    pub fn has_where(&self) -> bool {
        self.where_found
    }

    pub fn is_all_columns(&self) -> bool {
        self.column_expression == ALL_COLUMNS
    }
}

/// Locates a keyword, returning its start and end byte offsets.
fn find_keyword(text: &str, upper: &str, lower: &str) -> Option<(usize, usize)> {
    let mut found = None;
    if let Some(start) = text.find(upper) {
        found = Some((start, start + upper.len()));
    }
    // Lowercase overwrites an uppercase match
    if let Some(start) = text.find(lower) {
        found = Some((start, start + lower.len()));
    }
    found
}

/// Trimmed text in `[start, end)`, empty when the range is inverted.
fn region(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default().trim()
}
