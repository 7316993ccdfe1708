//! Shared state types for the town life simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod calendar;
pub mod queue;
pub mod resources;
pub mod state;
pub mod tmp;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use calendar::{Season, SimDate, DAYS_PER_SEASON, DAYS_PER_YEAR};
pub use queue::{EventId, QueuedEvent};
pub use resources::{
    ResourceKind, Resources, StatKind, Stats, RESOURCE_CAP, STAT_MAX, STAT_MIN,
};
pub use state::{Character, GameMessage, GameState, DEFAULT_MESSAGE_LIMIT};
pub use tmp::{TmpStore, TmpValue};
