//! Event queue entries.
//!
//! A `QueuedEvent` is the per-game record of an event that is counting down
//! toward possibly becoming active. Timing values are copies taken when the
//! entry was queued, so they stay stable even when the definition that
//! produced them depends on state that has since changed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an event definition.
///
/// Content modules claim id ranges by prefix (1000s, 2000s, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    /// Returns the thousands block this id belongs to (e.g. 1000 for 1042).
    pub fn block(self) -> u32 {
        self.0 / 1000 * 1000
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event_{}", self.0)
    }
}

impl From<u32> for EventId {
    fn from(value: u32) -> Self {
        EventId(value)
    }
}

/// An event currently being timed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedEvent {
    pub id: EventId,
    /// Fuzzed mean time to happen, in days. `Some(0)` fires on the next pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_time_to_happen: Option<u32>,
    /// Exact delay in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_time_to_happen: Option<u32>,
    /// Day on which this entry entered the queue.
    pub queued_at_day: u32,
    #[serde(default)]
    pub background: bool,
    /// Entry placed by a chain resolution rather than by eligibility.
    #[serde(default)]
    pub chained: bool,
}

impl QueuedEvent {
    /// Creates an entry with no timing fields; it is due immediately and kept
    /// across reconciliation without re-checking its condition.
    pub fn untimed(id: EventId, queued_at_day: u32) -> Self {
        Self {
            id,
            mean_time_to_happen: None,
            fixed_time_to_happen: None,
            queued_at_day,
            background: false,
            chained: false,
        }
    }

    /// Creates an entry timed by a mean time to happen.
    pub fn with_mtth(id: EventId, mtth: u32, queued_at_day: u32) -> Self {
        Self {
            mean_time_to_happen: Some(mtth),
            ..Self::untimed(id, queued_at_day)
        }
    }

    /// Creates an entry timed by an exact delay.
    pub fn with_fixed_delay(id: EventId, days: u32, queued_at_day: u32) -> Self {
        Self {
            fixed_time_to_happen: Some(days),
            ..Self::untimed(id, queued_at_day)
        }
    }

    /// Creates the zero-delay entry a chain resolution produces.
    pub fn chained(id: EventId, queued_at_day: u32) -> Self {
        Self {
            chained: true,
            ..Self::with_mtth(id, 0, queued_at_day)
        }
    }

    /// Marks the entry as a background event.
    pub fn in_background(mut self) -> Self {
        self.background = true;
        self
    }

    /// True when neither timing field is set.
    pub fn is_untimed(&self) -> bool {
        self.mean_time_to_happen.is_none() && self.fixed_time_to_happen.is_none()
    }

    /// Days elapsed since the entry was queued.
    pub fn days_since_queued(&self, days_passed: u32) -> u32 {
        days_passed.saturating_sub(self.queued_at_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_block() {
        assert_eq!(EventId(1042).block(), 1000);
        assert_eq!(EventId(3999).block(), 3000);
        assert_eq!(EventId(7).block(), 0);
    }

    #[test]
    fn test_chained_entry_fires_immediately() {
        let entry = QueuedEvent::chained(EventId(2001), 12);
        assert_eq!(entry.mean_time_to_happen, Some(0));
        assert_eq!(entry.fixed_time_to_happen, None);
        assert!(entry.chained);
        assert!(!entry.is_untimed());
    }

    #[test]
    fn test_days_since_queued_saturates() {
        let entry = QueuedEvent::with_mtth(EventId(1), 10, 20);
        assert_eq!(entry.days_since_queued(25), 5);
        assert_eq!(entry.days_since_queued(5), 0);
    }

    #[test]
    fn test_serialization_omits_absent_timing() {
        let entry = QueuedEvent::with_fixed_delay(EventId(1001), 3, 4);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":1001,"fixed_time_to_happen":3,"queued_at_day":4,"background":false,"chained":false}"#
        );
    }

    #[test]
    fn test_deserialization_defaults_flags() {
        let json = r#"{"id":2002,"mean_time_to_happen":40,"queued_at_day":9}"#;
        let entry: QueuedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(entry, QueuedEvent::with_mtth(EventId(2002), 40, 9));
    }
}
