//! Per-row predicate evaluation
//!
//! `=` is exact string equality. The relational operators coerce both sides
//! in a fixed order: integers (of any width) if both parse as integers,
//! otherwise floats if both parse as floats, otherwise plain string ordering.
//! A failed parse only moves on to the next strategy.

use std::cmp::Ordering;

use super::expression::SelectExpression;
use super::operator::ComparisonOp;

/// How a value and a literal were compared
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// Both sides parsed as integers
    Integer(Ordering),
    /// Both sides parsed as floats; `None` when either is NaN
    Float(Option<Ordering>),
    /// Lexicographic comparison of the raw strings
    Text(Ordering),
}

impl Comparison {
    /// Compares `value` with `literal` using the first strategy that applies
    pub fn of(value: &str, literal: &str) -> Self {
        if let (Some(left), Some(right)) = (Integer::parse(value), Integer::parse(literal)) {
            return Comparison::Integer(left.cmp(&right));
        }
        if let (Ok(left), Ok(right)) = (value.parse::<f64>(), literal.parse::<f64>()) {
            return Comparison::Float(left.partial_cmp(&right));
        }
        Comparison::Text(value.cmp(literal))
    }

    pub fn ordering(&self) -> Option<Ordering> {
        match self {
            Comparison::Integer(o) | Comparison::Text(o) => Some(*o),
            Comparison::Float(o) => *o,
        }
    }
}

/// Integer of any width, borrowed from its decimal text.
///
/// `digits` has no leading zeros; zero is the empty string and never
/// negative.
#[derive(Debug, PartialEq, Eq)]
struct Integer<'a> {
    negative: bool,
    digits: &'a str,
}

impl<'a> Integer<'a> {
    /// Parses an optional sign followed by one or more ASCII digits
    fn parse(text: &'a str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = unsigned.trim_start_matches('0');
        Some(Self {
            negative: negative && !digits.is_empty(),
            digits,
        })
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits))
    }
}

impl Ord for Integer<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude_cmp(other),
            (true, true) => other.magnitude_cmp(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Integer<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Decides whether a field value satisfies `value <op> literal`.
///
/// A missing operator or literal never matches.
pub fn check_match(op: Option<ComparisonOp>, literal: Option<&str>, value: &str) -> bool {
    let (op, literal) = match (op, literal) {
        (Some(op), Some(literal)) => (op, literal),
        _ => return false,
    };

    if op == ComparisonOp::Eq {
        return value == literal;
    }

    op.accepts(Comparison::of(value, literal).ordering())
}

impl SelectExpression {
    /// Tests one field value against this expression's predicate
    pub fn check_match(&self, value: &str) -> bool {
        check_match(self.operator(), self.where_value(), value)
    }
}
