//! Game state.
//!
//! The single value threaded through every scheduler pass and action effect.
//! Transformers take `&GameState` and hand back a new value; nothing holds a
//! mutable reference across a tick.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::calendar::SimDate;
use crate::queue::{EventId, QueuedEvent};
use crate::resources::{ResourceKind, Resources, StatKind, Stats};
use crate::tmp::TmpStore;

/// Default number of messages kept in the game log.
pub const DEFAULT_MESSAGE_LIMIT: usize = 50;

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub resources: Resources,
    pub stats: Stats,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Resources::default(),
            stats: Stats::default(),
        }
    }
}

/// A line in the game's message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    pub day: u32,
    pub text: String,
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub days_passed: u32,
    /// Event currently presented to the player, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_event: Option<EventId>,
    /// Events being timed, in presentation priority order.
    #[serde(default)]
    pub event_queue: Vec<QueuedEvent>,
    pub character: Character,
    #[serde(default)]
    pub flags: BTreeSet<String>,
    #[serde(default)]
    pub tmp: TmpStore,
    #[serde(default)]
    pub messages: Vec<GameMessage>,
    #[serde(default = "default_message_limit")]
    pub message_limit: usize,
}

fn default_message_limit() -> usize {
    DEFAULT_MESSAGE_LIMIT
}

impl GameState {
    /// Creates a fresh game on day zero.
    pub fn new(character: Character) -> Self {
        Self {
            days_passed: 0,
            active_event: None,
            event_queue: Vec::new(),
            character,
            flags: BTreeSet::new(),
            tmp: TmpStore::new(),
            messages: Vec::new(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }

    /// Current calendar date.
    pub fn date(&self) -> SimDate {
        SimDate::from_days(self.days_passed)
    }

    pub fn resource(&self, kind: ResourceKind) -> u32 {
        self.character.resources.get(kind)
    }

    pub fn stat(&self, kind: StatKind) -> u8 {
        self.character.stats.get(kind)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Checks whether an event with this id is queued.
    pub fn is_queued(&self, id: EventId) -> bool {
        self.event_queue.iter().any(|e| e.id == id)
    }

    /// Returns the queue entry for an id.
    pub fn queued(&self, id: EventId) -> Option<&QueuedEvent> {
        self.event_queue.iter().find(|e| e.id == id)
    }

    /// Appends a message, dropping the oldest once the log is full.
    pub fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push(GameMessage {
            day: self.days_passed,
            text: text.into(),
        });
        if self.messages.len() > self.message_limit {
            let excess = self.messages.len() - self.message_limit;
            self.messages.drain(..excess);
        }
    }

    /// Parses a state from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the state to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Character::new("Wat"))
    }

    #[test]
    fn test_new_state_is_empty() {
        let s = state();
        assert_eq!(s.days_passed, 0);
        assert!(s.active_event.is_none());
        assert!(s.event_queue.is_empty());
        assert_eq!(s.date().to_string(), "year_1.spring.day_1");
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut s = state();
        s.message_limit = 3;
        for i in 0..5 {
            s.push_message(format!("msg {}", i));
        }
        let texts: Vec<&str> = s.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_queue_lookup() {
        let mut s = state();
        s.event_queue.push(QueuedEvent::with_mtth(EventId(1001), 10, 0));
        assert!(s.is_queued(EventId(1001)));
        assert!(!s.is_queued(EventId(1002)));
        assert_eq!(s.queued(EventId(1001)).unwrap().mean_time_to_happen, Some(10));
    }

    #[test]
    fn test_json_roundtrip_preserves_queue_and_tmp() {
        let mut s = state();
        s.days_passed = 44;
        s.active_event = Some(EventId(2003));
        s.event_queue.push(QueuedEvent::chained(EventId(2004), 44));
        s.flags.insert("married".to_string());
        s.tmp.set("campaign.promised_renown", 12);
        s.push_message("A wedding!");

        let json = s.to_json().unwrap();
        let back = GameState::from_json(&json).unwrap();
        assert_eq!(back, s);
    }
}
