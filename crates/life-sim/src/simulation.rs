//! Headless day loop: tick, let the autopilot answer, autosave.

use life_core::{Scheduler, SimulationConfig};
use life_events::{Character, GameState, ResourceKind};
use rand::RngCore;

use crate::autopilot::Autopilot;
use crate::save::SaveStore;

/// Counters collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub days: u32,
    pub events_surfaced: u32,
    pub actions_taken: u32,
    pub saves_written: u32,
    pub saves_failed: u32,
}

/// Drives a game forward one day at a time.
#[derive(Debug)]
pub struct Simulation {
    scheduler: Scheduler,
    autopilot: Autopilot,
    settings: SimulationConfig,
    save_store: Option<SaveStore>,
    stats: RunStats,
}

impl Simulation {
    pub fn new(scheduler: Scheduler, settings: SimulationConfig) -> Self {
        Self {
            scheduler,
            autopilot: Autopilot::new(),
            settings,
            save_store: None,
            stats: RunStats::default(),
        }
    }

    /// Enables autosaving to `store`.
    pub fn with_save_store(mut self, store: SaveStore) -> Self {
        self.save_store = Some(store);
        self
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Creates a day-zero game using the configured starting resources.
    pub fn new_game(&self, name: &str) -> GameState {
        let mut character = Character::new(name);
        character.resources.set(ResourceKind::Coin, self.settings.starting_coin);
        character.resources.set(ResourceKind::Food, self.settings.starting_food);
        character.resources.set(ResourceKind::Renown, self.settings.starting_renown);

        let mut state = GameState::new(character);
        state.message_limit = self.settings.message_limit;
        state
    }

    /// Runs one day. An event that surfaces is answered the same day.
    pub fn step(&mut self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        let was_idle = state.active_event.is_none();
        let mut next = self.scheduler.tick(state, rng);
        self.stats.days += 1;

        if let Some(event) = next.active_event {
            if was_idle {
                self.stats.events_surfaced += 1;
                if let Some(definition) = self.scheduler.catalog().get(event) {
                    let text = definition.text(&next);
                    let line = if text.is_empty() {
                        definition.title.clone()
                    } else {
                        format!("{}: {}", definition.title, text)
                    };
                    next.push_message(line);
                }
            }
            next = self.answer(next, rng);
        }

        let interval = self.settings.autosave_interval_days;
        if interval > 0 && next.days_passed % interval == 0 {
            self.autosave(&mut next);
        }
        next
    }

    /// Runs `days` days.
    pub fn run(&mut self, state: &GameState, days: u32, rng: &mut dyn RngCore) -> GameState {
        let mut current = state.clone();
        for _ in 0..days {
            current = self.step(&current, rng);
        }
        current
    }

    fn answer(&mut self, state: GameState, rng: &mut dyn RngCore) -> GameState {
        let Some(index) = self.autopilot.choose(&self.scheduler, &state, rng) else {
            tracing::warn!(event = ?state.active_event, "no available action; dismissing event");
            let mut dismissed = state;
            dismissed.active_event = None;
            return dismissed;
        };

        match self.scheduler.choose_action(&state, index, rng) {
            Ok(next) => {
                self.stats.actions_taken += 1;
                next
            }
            Err(e) => {
                tracing::warn!(error = %e, "autopilot choice rejected");
                state
            }
        }
    }

    /// Saves without interrupting play. Failures go to the log and the
    /// in-game message list.
    fn autosave(&mut self, state: &mut GameState) {
        let Some(store) = &self.save_store else {
            return;
        };
        match store.save(state) {
            Ok(()) => {
                self.stats.saves_written += 1;
                tracing::info!(day = state.days_passed, path = %store.path().display(), "autosaved");
            }
            Err(e) => {
                self.stats.saves_failed += 1;
                tracing::warn!(error = %e, day = state.days_passed, "autosave failed");
                state.push_message(format!("Autosave failed: {}", e));
            }
        }
    }
}
