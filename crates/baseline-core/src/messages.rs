//! Analysis-scoped task messages surfaced to the end user.

use std::sync::Mutex;

/// A user-visible message attached to the current analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMessage {
    pub text: String,
    pub timestamp_ms: i64,
}

/// Append-only sink for analysis task messages.
///
/// Appending is fire-and-forget: it never fails and never blocks the
/// analysis.
pub struct TaskMessages {
    messages: Mutex<Vec<TaskMessage>>,
}

impl TaskMessages {
    /// Create an empty sink for a new analysis.
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Append a message with the given timestamp.
    pub fn add(&self, text: impl Into<String>, timestamp_ms: i64) {
        let mut messages = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push(TaskMessage {
            text: text.into(),
            timestamp_ms,
        });
    }

    /// Snapshot of all messages appended so far, in append order.
    pub fn all(&self) -> Vec<TaskMessage> {
        let messages = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.clone()
    }

    /// Number of messages appended so far.
    pub fn len(&self) -> usize {
        let messages = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.len()
    }

    /// Whether no messages have been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TaskMessages {
    fn default() -> Self {
        Self::new()
    }
}
