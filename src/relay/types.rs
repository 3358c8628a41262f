//! Types for relay publishing.

/// Result of publishing an event to relays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// The event ID that was published (hex).
    pub event_id: String,
    /// Relays the event was handed to.
    pub accepted_by: Vec<String>,
    /// Relays that could not be reached or refused the message (with reasons).
    pub failed: Vec<(String, String)>,
}

impl PublishResult {
    /// Creates an empty result for `event_id`.
    #[must_use]
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            accepted_by: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Returns true if at least one relay accepted the event.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.accepted_by.is_empty()
    }

    /// Returns the number of successful relays.
    #[must_use]
    pub const fn success_count(&self) -> usize {
        self.accepted_by.len()
    }

    /// Returns the total number of relays attempted.
    #[must_use]
    pub const fn total_attempted(&self) -> usize {
        self.accepted_by.len() + self.failed.len()
    }
}
