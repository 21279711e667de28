//! Comparison operators for WHERE clauses

use std::cmp::Ordering;
use std::fmt;

/// Comparison operator of a WHERE predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,
}

impl ComparisonOp {
    /// Order in which operators are searched for in a query.
    ///
    /// Two-character operators come first so `<=` is never read as `<`.
    pub const SEARCH_ORDER: [ComparisonOp; 5] = [
        ComparisonOp::Lte,
        ComparisonOp::Gte,
        ComparisonOp::Lt,
        ComparisonOp::Gt,
        ComparisonOp::Eq,
    ];

    /// Operator text as written in a query
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gte => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::Eq => "=",
        }
    }

    /// Finds the first operator in search order that occurs anywhere in
    /// `text`, with the byte offset of its first occurrence.
    pub fn find_in(text: &str) -> Option<(ComparisonOp, usize)> {
        Self::SEARCH_ORDER
            .iter()
            .find_map(|op| text.find(op.symbol()).map(|offset| (*op, offset)))
    }

    /// Applies the operator to an already computed ordering of
    /// `value` relative to the literal.
    ///
    /// `None` (incomparable, e.g. NaN) never matches.
    pub fn accepts(&self, ordering: Option<Ordering>) -> bool {
        match ordering {
            None => false,
            Some(ordering) => match self {
                ComparisonOp::Lte => ordering != Ordering::Greater,
                ComparisonOp::Gte => ordering != Ordering::Less,
                ComparisonOp::Lt => ordering == Ordering::Less,
                ComparisonOp::Gt => ordering == Ordering::Greater,
                ComparisonOp::Eq => ordering == Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_char_operators_win() {
        assert_eq!(ComparisonOp::find_in("a <= 3"), Some((ComparisonOp::Lte, 2)));
        assert_eq!(ComparisonOp::find_in("a >= 3"), Some((ComparisonOp::Gte, 2)));
        assert_eq!(ComparisonOp::find_in("a < 3"), Some((ComparisonOp::Lt, 2)));
        assert_eq!(ComparisonOp::find_in("a = 3"), Some((ComparisonOp::Eq, 2)));
        assert_eq!(ComparisonOp::find_in("a 3"), None);
    }

    #[test]
    fn test_search_is_global_and_ordered() {
        // `<` occurs later than `=` but is searched first
        assert_eq!(
            ComparisonOp::find_in("x = 1 < 2"),
            Some((ComparisonOp::Lt, 6))
        );
    }

    #[test]
    fn test_accepts() {
        assert!(ComparisonOp::Lte.accepts(Some(Ordering::Equal)));
        assert!(ComparisonOp::Lte.accepts(Some(Ordering::Less)));
        assert!(!ComparisonOp::Lt.accepts(Some(Ordering::Equal)));
        assert!(ComparisonOp::Gt.accepts(Some(Ordering::Greater)));
        assert!(!ComparisonOp::Gte.accepts(Some(Ordering::Less)));
        assert!(!ComparisonOp::Gte.accepts(None));
    }

    #[test]
    fn test_display() {
        assert_eq!(ComparisonOp::Gte.to_string(), ">=");
    }
}
