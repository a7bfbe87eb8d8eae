//! Deferred user-facing notifications.

use std::collections::BTreeSet;

use crate::error::AnalyzerError;

/// Deduplicated set of notifications collected during a run.
///
/// The caller owns the collector, passes it by `&mut` into each operation
/// and renders it once after all other output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    messages: BTreeSet<String>,
}

impl Notifications {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message. Returns `false` if it was already present.
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        self.messages.insert(message.into())
    }

    /// Record the user-facing line for a recovered error.
    pub fn record(&mut self, error: &AnalyzerError) {
        tracing::warn!(%error, "recovered from failure");
        self.push(error.notification());
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of distinct messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the exact message has been recorded.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.contains(message)
    }

    /// Iterate messages in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut notes = Notifications::new();
        assert!(notes.push("API not available, try again later"));
        assert!(!notes.push("API not available, try again later"));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_record_uses_error_notification() {
        let mut notes = Notifications::new();
        notes.record(&AnalyzerError::RateLimited { reset_at: None });
        notes.record(&AnalyzerError::RateLimited { reset_at: Some(5) });
        assert_eq!(notes.len(), 1);
        assert!(notes.contains("API rate limit exceeded, try again later"));
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut notes = Notifications::new();
        notes.push("b");
        notes.push("a");
        assert_eq!(notes.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
