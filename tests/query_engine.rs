//! Query Engine Tests
//!
//! End-to-end tests of parsing and executing select expressions against
//! tables on disk:
//! - Expression parsing against a loaded header
//! - Mixed integer / float / string comparison
//! - Repeatable execution (every query re-reads from the top)
//! - Invalid expressions are rejected before any row is read

use csvdb::query::{ComparisonOp, SelectExpression};
use csvdb::table::{CsvTable, Row};
use csvdb::CsvError;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const INVENTORY: &str = "\
# warehouse inventory
sku,name,qty,price

A1,\"bolt, small\",120,0.10
A2,nut,80,0.05
B7,washer,abc,1.5
# discontinued below
C3,gear,9,12.75
";

fn setup_table(content: &str) -> (TempDir, CsvTable) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("inventory.csv");
    fs::write(&path, content).unwrap();

    let mut table = CsvTable::new();
    table.load(&path).unwrap();
    (tmp, table)
}

fn column(rows: &[Row], index: usize) -> Vec<&str> {
    rows.iter().map(|r| r[index].as_str()).collect()
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_select_star_expands_header() {
    let (_tmp, table) = setup_table(INVENTORY);
    let expr = SelectExpression::parse("SELECT *", &table);

    assert!(expr.is_valid());
    assert_eq!(expr.select_columns(), &["sku", "name", "qty", "price"]);
    assert_eq!(expr.where_column(), None);
}

#[test]
fn test_parse_binds_to_loaded_header() {
    let (_tmp, table) = setup_table(INVENTORY);

    let expr = SelectExpression::parse("select sku where qty >= 80", &table);
    assert!(expr.is_valid());
    assert_eq!(expr.where_column(), Some("qty"));
    assert_eq!(expr.operator(), Some(ComparisonOp::Gte));
    assert_eq!(expr.where_value(), Some("80"));

    let expr = SelectExpression::parse("SELECT sku, weight", &table);
    assert!(!expr.is_valid());
}

// =============================================================================
// Execution Tests
// =============================================================================

#[test]
fn test_select_all_rows() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    let rows = table.query("SELECT *").unwrap();

    assert_eq!(rows.len(), 4);
    // Quotes are kept and the quoted delimiter stays in the field
    assert_eq!(rows[0], vec!["A1", "\"bolt, small\"", "120", "0.10"]);
}

#[test]
fn test_integer_comparison() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    let rows = table.query("SELECT sku WHERE qty < 100").unwrap();

    // 80 and 9 compare as integers; "abc" < "100" is false as strings
    assert_eq!(column(&rows, 0), vec!["A2", "C3"]);
}

#[test]
fn test_float_comparison() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    let rows = table.query("SELECT sku, price WHERE price > 1").unwrap();

    assert_eq!(column(&rows, 0), vec!["B7", "C3"]);
    assert_eq!(column(&rows, 1), vec!["1.5", "12.75"]);
}

#[test]
fn test_string_fallback_comparison() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    let rows = table.query("SELECT sku WHERE name >= nut").unwrap();

    assert_eq!(column(&rows, 0), vec!["A2", "B7"]);
}

#[test]
fn test_equality_is_exact() {
    let (_tmp, mut table) = setup_table(INVENTORY);

    let rows = table.query("SELECT name WHERE sku = C3").unwrap();
    assert_eq!(rows, vec![vec!["gear".to_string()]]);

    // No numeric coercion for `=`
    let rows = table.query("SELECT name WHERE price = 0.1").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_unknown_where_column_keeps_every_row() {
    let (_tmp, mut table) = setup_table("a,b\n1,2\n3,4\n");
    let rows = table.query("SELECT a WHERE zzz = 1").unwrap();
    assert_eq!(rows, vec![vec!["1".to_string()], vec!["3".to_string()]]);
}

#[test]
fn test_projection_order_follows_query() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    let rows = table.query("SELECT price, sku WHERE sku = A2").unwrap();
    assert_eq!(rows, vec![vec!["0.05".to_string(), "A2".to_string()]]);
}

// =============================================================================
// Repeatability Tests
// =============================================================================

/// Same expression on an unchanged file returns the same rows every time.
#[test]
fn test_execution_is_repeatable() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    let expr = SelectExpression::parse("SELECT sku WHERE qty <= 100", &table);

    let first = table.select_with_expression(&expr).unwrap();
    for _ in 0..10 {
        assert_eq!(table.select_with_expression(&expr).unwrap(), first);
    }
}

/// A partially consumed cursor does not affect the next query.
#[test]
fn test_query_after_manual_iteration() {
    let (_tmp, mut table) = setup_table(INVENTORY);
    table.next_row().unwrap();
    table.next_row().unwrap();

    let rows = table.query("SELECT sku").unwrap();
    assert_eq!(column(&rows, 0), vec!["A1", "A2", "B7", "C3"]);
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_invalid_expression_carries_text() {
    let (_tmp, mut table) = setup_table(INVENTORY);

    let err = table.query("SELECT weight").unwrap_err();
    assert!(matches!(err, CsvError::InvalidSelectExpression(ref t) if t == "SELECT weight"));

    let err = table.query("sku, qty").unwrap_err();
    assert!(matches!(err, CsvError::InvalidSelectExpression(_)));

    let err = table.query("SELECT sku WHERE qty").unwrap_err();
    assert!(matches!(err, CsvError::InvalidSelectExpression(_)));
}

#[test]
fn test_unloaded_table_rejects_queries() {
    let mut table = CsvTable::new();

    let err = table.select(&["*"], "*", "*").unwrap_err();
    assert!(matches!(err, CsvError::UninitializedTable));

    // Nothing parses against an empty header
    let expr = SelectExpression::parse("SELECT x", &table);
    assert!(!expr.is_valid());
}

// =============================================================================
// Positional Select Tests
// =============================================================================

#[test]
fn test_positional_select() {
    let (_tmp, mut table) = setup_table(INVENTORY);

    let all = table.select(&["*"], "*", "*").unwrap();
    assert_eq!(all.len(), 4);

    let rows = table.select(&["sku", "qty"], "name", "nut").unwrap();
    assert_eq!(rows, vec![vec!["A2".to_string(), "80".to_string()]]);

    let err = table.select(&["sku"], "color", "red").unwrap_err();
    assert!(matches!(err, CsvError::UnknownLabel(ref l) if l == "color"));
}

#[test]
fn test_trailing_delimiter_on_last_line() {
    // The final line has no terminator, so its trailing empty field is dropped
    let (_tmp, mut table) = setup_table("a,b,c\n1,2,\n3,4,");
    let rows = table.select(&["*"], "*", "*").unwrap();

    assert_eq!(rows[0], vec!["1", "2", ""]);
    assert_eq!(rows[1], vec!["3", "4"]);

    let err = table.select(&["c"], "*", "*").unwrap_err();
    assert!(matches!(err, CsvError::InvalidRow { expected: 3, found: 2 }));
}
