//! History of completed operations.

use crate::operation::Operation;
use serde::{Deserialize, Serialize};

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One completed remote operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as the user entered it.
    pub expression: String,
    /// The operation that was applied.
    pub operation: Operation,
    /// The result text returned by the service.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(
        expression: impl Into<String>,
        operation: Operation,
        result: impl Into<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            operation,
            result: result.into(),
        }
    }

    /// One-line rendering, e.g. `Derive: x^2 = 2 x`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} = {}",
            self.operation.label(),
            self.expression,
            self.result
        )
    }
}

/// Newest-first list of entries, never longer than its limit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert at the front, dropping the oldest entries past `limit`.
    pub fn push(&mut self, entry: HistoryEntry, limit: usize) {
        self.entries.insert(0, entry);
        self.entries.truncate(limit);
    }

    /// Drop the oldest entries past `limit`, e.g. after the limit was lowered.
    pub fn truncate(&mut self, limit: usize) {
        self.entries.truncate(limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("x+{n}"), Operation::Simplify, format!("x + {n}"))
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::new();
        history.push(entry(1), DEFAULT_HISTORY_LIMIT);
        history.push(entry(2), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.latest(), Some(&entry(2)));
        assert_eq!(history.entries()[1], entry(1));
    }

    #[test]
    fn test_capped_at_limit() {
        let mut history = History::new();
        for n in 0..25 {
            history.push(entry(n), DEFAULT_HISTORY_LIMIT);
            assert!(history.len() <= DEFAULT_HISTORY_LIMIT);
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.latest(), Some(&entry(24)));
        assert_eq!(history.entries().last(), Some(&entry(15)));
    }

    #[test]
    fn test_summary() {
        let e = HistoryEntry::new("x^2", Operation::Derive, "2 x");
        assert_eq!(e.summary(), "Derive: x^2 = 2 x");
    }

    #[test]
    fn test_serializes_as_array() {
        let mut history = History::new();
        history.push(HistoryEntry::new("x", Operation::Abs, "|x|"), 10);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(
            json,
            r#"[{"expression":"x","operation":"abs","result":"|x|"}]"#
        );
    }
}
