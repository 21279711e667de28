//! Header index: column label to positional offset
//!
//! The label map is rebuilt from scratch after every append so it always
//! mirrors the current header contents.

use std::collections::HashMap;

use crate::errors::{CsvError, CsvResult};

/// Ordered header labels plus a label → offset map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    labels: Vec<String>,
    offsets: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Creates an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header from labels in arrival order
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut header = Self::new();
        for label in labels {
            header.push(label);
        }
        header
    }

    /// Appends a label and rebuilds the index
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
        self.rebuild();
    }

    /// Recomputes the label → offset map from the current labels
    pub fn rebuild(&mut self) {
        self.offsets = self
            .labels
            .iter()
            .enumerate()
            .map(|(offset, label)| (label.clone(), offset))
            .collect();
    }

    /// Drops all labels
    pub fn clear(&mut self) {
        self.labels.clear();
        self.offsets.clear();
    }

    /// Labels in header order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Offset of `label`, if present
    pub fn offset(&self, label: &str) -> Option<usize> {
        self.offsets.get(label).copied()
    }

    /// Offset of `label`, failing with `UnknownLabel` when absent
    pub fn require(&self, label: &str) -> CsvResult<usize> {
        self.offset(label)
            .ok_or_else(|| CsvError::UnknownLabel(label.to_string()))
    }

    /// Returns true if `label` is part of the header
    pub fn contains(&self, label: &str) -> bool {
        self.offsets.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_offsets_are_a_bijection() {
        let header = HeaderIndex::from_labels(["id", "name", "age"]);

        let offsets: HashSet<usize> = header
            .labels()
            .iter()
            .map(|l| header.offset(l).unwrap())
            .collect();

        assert_eq!(offsets.len(), header.len());
        assert!(offsets.iter().all(|o| *o < header.len()));
    }

    #[test]
    fn test_incremental_push_rebuilds() {
        let mut header = HeaderIndex::new();
        header.push("a");
        assert_eq!(header.offset("a"), Some(0));
        assert_eq!(header.offset("b"), None);

        header.push("b");
        assert_eq!(header.offset("a"), Some(0));
        assert_eq!(header.offset("b"), Some(1));
    }

    #[test]
    fn test_require_unknown_label() {
        let header = HeaderIndex::from_labels(["x"]);
        assert_eq!(header.require("x").unwrap(), 0);

        let err = header.require("missing").unwrap_err();
        assert!(matches!(err, CsvError::UnknownLabel(ref l) if l == "missing"));
    }

    #[test]
    fn test_clear() {
        let mut header = HeaderIndex::from_labels(["x", "y"]);
        header.clear();
        assert!(header.is_empty());
        assert!(!header.contains("x"));
    }
}
