//! Event scheduling.
//!
//! Once per simulated day the scheduler makes two passes over the game state:
//!
//! 1. [`Scheduler::update_event_queue`] reconciles the queue with the catalog:
//!    entries whose event is no longer eligible leave, newly eligible events
//!    join with their timing copied (and the mean time to happen fuzzed).
//! 2. [`Scheduler::update_active_event`] walks the queue in order and resolves
//!    the first entry that is due, either surfacing it to the player or, for
//!    background events, applying its first action directly.
//!
//! Mean-time-to-happen events use a discrete hazard: an entry queued `d` days
//! ago has fired with probability `1 - 2^(-d / mtth)`. Draws only happen every
//! `check_interval` days to bound the number of random draws per event.
//!
//! Every operation takes `&GameState` and returns a new state. Randomness is
//! drawn from the caller's RNG on each call and never cached.

use life_events::{EventId, GameState, QueuedEvent};
use rand::{Rng, RngCore};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::action::Action;
use crate::catalog::Catalog;
use crate::config::SchedulerConfig;

/// Errors from invoking an action on the active event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("no event is active")]
    NoActiveEvent,
    #[error("active event {0} is not in the catalog")]
    UnknownEvent(EventId),
    #[error("event {event} has no action {index}")]
    NoSuchAction { event: EventId, index: usize },
    #[error("action {index} of event {event} is not available")]
    ActionUnavailable { event: EventId, index: usize },
}

/// Probability that an event with this mean time to happen has fired after
/// `days_since_queued` days.
pub fn hazard_chance(days_since_queued: u32, mtth: u32) -> f64 {
    if mtth == 0 {
        return 1.0;
    }
    1.0 - 2f64.powf(-f64::from(days_since_queued) / f64::from(mtth))
}

/// Perturbs a mean time to happen so events sharing an authored value do not
/// fire in lockstep. Zero is returned unchanged; anything else stays within
/// `1..=u32::MAX`.
pub fn fuzzy_up_mtth(mtth: u32, config: &SchedulerConfig, rng: &mut dyn RngCore) -> u32 {
    if mtth == 0 {
        return 0;
    }
    let spread = i64::from(config.fuzz_spread(mtth));
    let offset = rng.gen_range(-spread..=spread);
    (i64::from(mtth) + offset).clamp(1, i64::from(u32::MAX)) as u32
}

/// Drives event timing against an immutable catalog.
#[derive(Debug, Clone)]
pub struct Scheduler {
    catalog: Arc<Catalog>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(catalog: Arc<Catalog>, config: SchedulerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn with_defaults(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, SchedulerConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Fuzzes a mean time to happen with this scheduler's settings.
    pub fn fuzzy_up_mtth(&self, mtth: u32, rng: &mut dyn RngCore) -> u32 {
        fuzzy_up_mtth(mtth, &self.config, rng)
    }

    /// Reconciles the queue against current eligibility.
    ///
    /// Surviving entries keep their order and come first; newly eligible
    /// events follow in catalog order.
    pub fn update_event_queue(&self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        let mut next = state.clone();

        let mut kept: Vec<QueuedEvent> = Vec::with_capacity(state.event_queue.len());
        let mut existing_ids: HashSet<EventId> = HashSet::with_capacity(state.event_queue.len());
        for entry in &state.event_queue {
            if existing_ids.contains(&entry.id) {
                continue;
            }
            let Some(definition) = self.catalog.get(entry.id) else {
                tracing::debug!(event = %entry.id, "dropping queued event missing from catalog");
                continue;
            };
            if entry.is_untimed() || entry.chained || definition.is_eligible(state) {
                existing_ids.insert(entry.id);
                kept.push(entry.clone());
            } else {
                tracing::debug!(event = %entry.id, day = state.days_passed, "event no longer eligible");
            }
        }

        for definition in self.catalog.events() {
            if existing_ids.contains(&definition.id) || !definition.is_eligible(state) {
                continue;
            }
            let entry = QueuedEvent {
                id: definition.id,
                mean_time_to_happen: definition
                    .mean_time_to_happen(state)
                    .map(|mtth| self.fuzzy_up_mtth(mtth, rng)),
                fixed_time_to_happen: definition.fixed_time_to_happen(state),
                queued_at_day: state.days_passed,
                background: definition.background,
                chained: false,
            };
            tracing::debug!(
                event = %entry.id,
                mtth = ?entry.mean_time_to_happen,
                fixed = ?entry.fixed_time_to_happen,
                day = state.days_passed,
                "queued event"
            );
            existing_ids.insert(entry.id);
            kept.push(entry);
        }

        next.event_queue = kept;
        next
    }

    /// Checks whether a queue entry should resolve today. Draws at most one
    /// random number.
    pub fn is_due(&self, entry: &QueuedEvent, days_passed: u32, rng: &mut dyn RngCore) -> bool {
        let days_since = entry.days_since_queued(days_passed);
        match (entry.fixed_time_to_happen, entry.mean_time_to_happen) {
            (Some(fixed), _) => days_since >= fixed,
            (None, Some(0)) => true,
            (None, Some(mtth)) => {
                if days_since % self.config.check_interval(mtth) != 0 {
                    return false;
                }
                let chance = hazard_chance(days_since, mtth);
                let roll = rng.gen::<f64>();
                tracing::trace!(event = %entry.id, days_since, mtth, chance, roll, "hazard check");
                roll < chance
            }
            (None, None) => true,
        }
    }

    /// Resolves the first due queue entry, if no event is already active.
    ///
    /// At most one entry is resolved per call. A foreground entry becomes the
    /// active event; a background entry applies its first action when that
    /// action's condition holds and otherwise just leaves the queue.
    pub fn update_active_event(&self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        if state.active_event.is_some() {
            return state.clone();
        }

        let Some(position) = state
            .event_queue
            .iter()
            .position(|entry| self.is_due(entry, state.days_passed, rng))
        else {
            return state.clone();
        };

        let mut next = state.clone();
        let entry = next.event_queue.remove(position);

        if !entry.background {
            tracing::info!(event = %entry.id, date = %state.date(), "event surfaced");
            next.active_event = Some(entry.id);
            return next;
        }

        match self
            .catalog
            .get(entry.id)
            .and_then(|definition| definition.first_action())
        {
            Some(action) if action.is_available(&next) => {
                tracing::debug!(event = %entry.id, day = state.days_passed, "background event applied");
                action.apply(&next, rng)
            }
            _ => {
                tracing::debug!(event = %entry.id, day = state.days_passed, "background event skipped");
                next
            }
        }
    }

    /// Advances one day, then reconciles the queue and resolves at most one
    /// due event.
    pub fn tick(&self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        let mut next = state.clone();
        next.days_passed += 1;
        let next = self.update_event_queue(&next, rng);
        self.update_active_event(&next, rng)
    }

    /// Lists the active event's actions that may be chosen now, with their
    /// positions in the event's action list.
    pub fn available_actions<'a>(&'a self, state: &GameState) -> Vec<(usize, &'a Action)> {
        let Some(definition) = state.active_event.and_then(|id| self.catalog.get(id)) else {
            return Vec::new();
        };
        definition
            .actions
            .iter()
            .enumerate()
            .filter(|(_, action)| action.is_available(state))
            .collect()
    }

    /// Applies the player's choice for the active event and clears it.
    pub fn choose_action(
        &self,
        state: &GameState,
        index: usize,
        rng: &mut dyn RngCore,
    ) -> Result<GameState, ActionError> {
        let event = state.active_event.ok_or(ActionError::NoActiveEvent)?;
        let definition = self
            .catalog
            .get(event)
            .ok_or(ActionError::UnknownEvent(event))?;
        let action = definition
            .actions
            .get(index)
            .ok_or(ActionError::NoSuchAction { event, index })?;
        if !action.is_available(state) {
            return Err(ActionError::ActionUnavailable { event, index });
        }

        tracing::debug!(event = %event, action = %action.text, "action chosen");
        let mut cleared = state.clone();
        cleared.active_event = None;
        Ok(action.apply(&cleared, rng))
    }
}
