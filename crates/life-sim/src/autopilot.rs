//! Stand-in player for headless runs.

use life_core::Scheduler;
use life_events::GameState;
use rand::{Rng, RngCore};

/// Picks uniformly among the active event's available actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Returns the index of the chosen action within the event's action list,
    /// or `None` when nothing is active or nothing is available.
    pub fn choose(
        &self,
        scheduler: &Scheduler,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        let options = scheduler.available_actions(state);
        if options.is_empty() {
            return None;
        }
        let (index, action) = options[rng.gen_range(0..options.len())];
        tracing::trace!(action = %action.text, "autopilot choice");
        Some(index)
    }
}
