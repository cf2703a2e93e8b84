//! Suppression of repeated error notifications.

use std::collections::VecDeque;

/// Default number of error messages kept for diagnostics.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Recent critical error messages, oldest first.
///
/// A message is announced only when it differs from the one recorded right
/// before it. Only the last entry matters for that decision, so the history
/// is capped to keep a long-running process bounded.
#[derive(Debug, Clone)]
pub struct ErrorHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for ErrorHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ErrorHistory {
    /// Create a history retaining at most `capacity` messages (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `message` and report whether it should be announced.
    pub fn should_notify(&mut self, message: &str) -> bool {
        let notify = self.entries.back().is_none_or(|last| last != message);

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.to_string());

        notify
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
