#[cfg(test)]
#[path = "dedupe_test.rs"]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Remembers when each message was last shown so repeats can be suppressed.
#[derive(Debug)]
pub struct DedupeCache {
    entries: HashMap<String, Instant>,
    suppression_window: Duration,
    retention_window: Duration,
}

impl DedupeCache {
    pub fn new(suppression_window: Duration, retention_window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            suppression_window,
            retention_window,
        }
    }

    /// True when `key` was recorded less than the suppression window ago.
    pub fn should_suppress(&self, key: &str, now: Instant) -> bool {
        self.entries
            .get(key)
            .is_some_and(|seen| now.saturating_duration_since(*seen) < self.suppression_window)
    }

    /// Records `key` as seen at `now`, then drops every entry older than the
    /// retention window.
    pub fn record_and_maybe_evict(&mut self, key: &str, now: Instant) {
        self.entries.insert(key.to_string(), now);
        let retention = self.retention_window;
        self.entries
            .retain(|_, seen| now.saturating_duration_since(*seen) <= retention);
    }

    pub fn last_seen(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
