//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to use these helpers from other crates.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // life-events = { path = "../life-events", features = ["test-fixtures"] }
//!
//! use life_events::fixtures;
//!
//! let state = fixtures::sample_state();
//! ```

use crate::{Character, GameState, ResourceKind};

/// Returns a saved game from the fixtures file.
///
/// Day 95, event 1002 active, three queued entries:
/// - 2101, chained, zero delay
/// - 1001, mean time to happen 61 days
/// - 4001, background, fixed 30 day delay
pub fn sample_state() -> GameState {
    let json = include_str!("../tests/fixtures/sample_save.json");
    GameState::from_json(json).expect("Failed to parse sample_save.json")
}

/// Returns a fresh day-zero game for a named character with some coin.
pub fn fresh_state(name: &str) -> GameState {
    let mut character = Character::new(name);
    character.resources.set(ResourceKind::Coin, 20);
    character.resources.set(ResourceKind::Food, 10);
    GameState::new(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventId;

    #[test]
    fn test_sample_state_loads() {
        let state = sample_state();
        assert_eq!(state.days_passed, 95);
        assert_eq!(state.active_event, Some(EventId(1002)));
        assert_eq!(state.event_queue.len(), 3);
        assert!(state.event_queue[0].chained);
        assert!(state.event_queue[2].background);
        assert_eq!(state.tmp.get_text("rival.name", ""), "Osric");
    }
}
