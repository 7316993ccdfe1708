//! Weighted follow-up event selection.
//!
//! An [`EventChain`] is an ordered list of candidate follow-up events. When
//! an action resolves the chain, candidates whose condition fails are
//! discarded, each survivor's weight is scaled by whichever of its factors
//! currently hold, and one candidate is drawn in proportion to its weight.
//! The winner goes to the front of the queue with a zero mean time to
//! happen, so it is the first thing the next scheduler pass considers.
//!
//! ```
//! use life_core::{Condition, EventChain};
//! use life_events::StatKind;
//!
//! let chain = EventChain::trigger(2101u32)
//!     .or_trigger(2102u32)
//!     .with_weight(3.0)
//!     .multiply_by_factor(2.0, Condition::stat_at_least(StatKind::Cunning, 6))
//!     .or_trigger(2103u32)
//!     .only_when(Condition::has_flag("armed"));
//! assert_eq!(chain.candidates().len(), 3);
//! ```

use life_events::{EventId, GameState, QueuedEvent};
use rand::{Rng, RngCore};

use crate::action::{Condition, Effect};

/// A multiplier applied to a candidate's weight while its condition holds.
#[derive(Debug, Clone)]
pub struct WeightFactor {
    pub factor: f64,
    pub condition: Condition,
}

/// One possible follow-up.
#[derive(Debug, Clone)]
pub struct ChainCandidate {
    pub event_id: EventId,
    pub weight: f64,
    pub condition: Option<Condition>,
    pub factors: Vec<WeightFactor>,
}

impl ChainCandidate {
    pub fn new(event_id: impl Into<EventId>, weight: f64) -> Self {
        Self {
            event_id: event_id.into(),
            weight,
            condition: None,
            factors: Vec::new(),
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_factor(mut self, factor: f64, condition: Condition) -> Self {
        self.factors.push(WeightFactor { factor, condition });
        self
    }

    /// Checks the candidate's gate against the state.
    pub fn is_eligible(&self, state: &GameState) -> bool {
        self.condition.as_ref().map_or(true, |c| c.holds(state))
    }

    /// Base weight times every factor whose condition holds. Never negative.
    pub fn effective_weight(&self, state: &GameState) -> f64 {
        let weight = self
            .factors
            .iter()
            .filter(|f| f.condition.holds(state))
            .fold(self.weight, |w, f| w * f.factor);
        weight.max(0.0)
    }
}

/// An ordered set of weighted follow-up candidates.
#[derive(Debug, Clone, Default)]
pub struct EventChain {
    candidates: Vec<ChainCandidate>,
}

impl EventChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a chain with a single candidate of weight 1.
    pub fn trigger(event_id: impl Into<EventId>) -> Self {
        Self::new().or_trigger(event_id)
    }

    pub fn from_candidates(candidates: Vec<ChainCandidate>) -> Self {
        Self { candidates }
    }

    /// Adds another candidate of weight 1.
    pub fn or_trigger(mut self, event_id: impl Into<EventId>) -> Self {
        self.candidates.push(ChainCandidate::new(event_id, 1.0));
        self
    }

    /// Sets the base weight of the most recently added candidate.
    pub fn with_weight(mut self, weight: f64) -> Self {
        if let Some(last) = self.candidates.last_mut() {
            last.weight = weight;
        }
        self
    }

    /// Scales the most recently added candidate's weight by `factor` whenever
    /// `condition` holds at resolution time. Factors compose multiplicatively.
    pub fn multiply_by_factor(mut self, factor: f64, condition: Condition) -> Self {
        if let Some(last) = self.candidates.last_mut() {
            last.factors.push(WeightFactor { factor, condition });
        }
        self
    }

    /// Gates the most recently added candidate.
    pub fn only_when(mut self, condition: Condition) -> Self {
        if let Some(last) = self.candidates.last_mut() {
            last.condition = Some(condition);
        }
        self
    }

    pub fn candidates(&self) -> &[ChainCandidate] {
        &self.candidates
    }

    /// Draws one eligible candidate, or `None` when no candidate's condition
    /// holds.
    pub fn select(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<EventId> {
        let weighted: Vec<(EventId, f64)> = self
            .candidates
            .iter()
            .filter(|c| c.is_eligible(state))
            .map(|c| (c.event_id, c.effective_weight(state)))
            .collect();

        let (fallback, _) = *weighted.last()?;
        let total_weight: f64 = weighted.iter().map(|(_, w)| w).sum();

        // Generate random value in [0, total_weight)
        let roll = rng.gen::<f64>() * total_weight;

        let mut cumulative = 0.0;
        for (event_id, weight) in &weighted {
            cumulative += weight;
            if cumulative > roll {
                return Some(*event_id);
            }
        }

        // All-zero weights or rounding at the top end
        Some(fallback)
    }

    /// Picks a follow-up and queues it ahead of everything else. Returns an
    /// unchanged copy of the state when no candidate is eligible.
    pub fn resolve(&self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        match self.select(state, rng) {
            Some(event_id) => {
                tracing::debug!(event = %event_id, day = state.days_passed, "chain selected follow-up");
                enqueue_chained(state, event_id)
            }
            None => {
                tracing::trace!(day = state.days_passed, "chain had no eligible candidates");
                state.clone()
            }
        }
    }

    /// Wraps the chain as an action effect.
    pub fn into_effect(self) -> Effect {
        Effect::new(move |state, rng| self.resolve(state, rng))
    }
}

/// Puts `event_id` at the front of the queue as a zero-delay chained entry.
/// Any existing entry for the same id is replaced.
pub fn enqueue_chained(state: &GameState, event_id: EventId) -> GameState {
    let mut next = state.clone();
    next.event_queue.retain(|e| e.id != event_id);
    next.event_queue
        .insert(0, QueuedEvent::chained(event_id, state.days_passed));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_events::{Character, StatKind};
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        GameState::new(Character::new("Wat"))
    }

    #[test]
    fn test_builder_targets_last_candidate() {
        let chain = EventChain::trigger(1u32)
            .with_weight(2.0)
            .or_trigger(2u32)
            .with_weight(5.0)
            .only_when(Condition::never());

        let c = chain.candidates();
        assert_eq!(c[0].weight, 2.0);
        assert!(c[0].condition.is_none());
        assert_eq!(c[1].weight, 5.0);
        assert!(!c[1].is_eligible(&state()));
    }

    #[test]
    fn test_builder_on_empty_chain_is_noop() {
        let chain = EventChain::new()
            .with_weight(3.0)
            .only_when(Condition::never())
            .multiply_by_factor(2.0, Condition::always());
        assert!(chain.candidates().is_empty());
    }

    #[test]
    fn test_factors_compose_multiplicatively() {
        let mut s = state();
        s.character.stats.set(StatKind::Cunning, 8);
        let candidate = ChainCandidate::new(1u32, 2.0)
            .with_factor(3.0, Condition::stat_at_least(StatKind::Cunning, 5))
            .with_factor(0.5, Condition::always())
            .with_factor(100.0, Condition::never());
        assert_eq!(candidate.effective_weight(&s), 3.0);
    }

    #[test]
    fn test_factors_evaluated_at_resolution_time() {
        let chain = EventChain::trigger(1u32)
            .or_trigger(2u32)
            .with_weight(0.0)
            .multiply_by_factor(10.0, Condition::has_flag("lucky"));
        let candidate = &chain.candidates()[1];

        let mut s = state();
        assert_eq!(candidate.effective_weight(&s), 0.0);
        s.flags.insert("lucky".to_string());
        // Zero base weight stays zero no matter the factor
        assert_eq!(candidate.effective_weight(&s), 0.0);

        let chain = EventChain::trigger(1u32)
            .or_trigger(2u32)
            .multiply_by_factor(10.0, Condition::has_flag("lucky"));
        assert_eq!(chain.candidates()[1].effective_weight(&s), 10.0);
    }

    #[test]
    fn test_negative_weight_clamps_to_zero() {
        let candidate = ChainCandidate::new(1u32, 2.0).with_factor(-1.0, Condition::always());
        assert_eq!(candidate.effective_weight(&state()), 0.0);
    }

    #[test]
    fn test_select_walks_cumulative_weights() {
        let chain = EventChain::trigger(1u32).or_trigger(2u32).with_weight(3.0);

        // StepRng(0, 0) always yields 0.0 -> first candidate
        let mut low = StepRng::new(0, 0);
        assert_eq!(chain.select(&state(), &mut low), Some(EventId(1)));

        // u64::MAX yields a value just below 1.0 -> last candidate
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(chain.select(&state(), &mut high), Some(EventId(2)));
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_last() {
        let chain = EventChain::trigger(1u32)
            .with_weight(0.0)
            .or_trigger(2u32)
            .with_weight(0.0)
            .or_trigger(3u32)
            .with_weight(0.0)
            .only_when(Condition::never());
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(chain.select(&state(), &mut rng), Some(EventId(2)));
    }

    #[test]
    fn test_resolve_with_no_eligible_candidate_is_noop() {
        let chain = EventChain::trigger(1u32).only_when(Condition::never());
        let mut s = state();
        s.event_queue.push(QueuedEvent::with_mtth(EventId(7), 30, 0));
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(chain.resolve(&s, &mut rng), s);
    }

    #[test]
    fn test_resolve_prepends_chained_entry() {
        let mut s = state();
        s.days_passed = 12;
        s.event_queue.push(QueuedEvent::with_mtth(EventId(7), 30, 0));
        s.event_queue.push(QueuedEvent::with_fixed_delay(EventId(8), 3, 5));

        let mut rng = SmallRng::seed_from_u64(3);
        let next = EventChain::trigger(9u32).resolve(&s, &mut rng);

        let ids: Vec<EventId> = next.event_queue.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId(9), EventId(7), EventId(8)]);
        assert_eq!(next.event_queue[0], QueuedEvent::chained(EventId(9), 12));
    }

    #[test]
    fn test_enqueue_chained_replaces_existing_entry() {
        let mut s = state();
        s.event_queue.push(QueuedEvent::with_mtth(EventId(7), 30, 0));
        s.event_queue.push(QueuedEvent::with_mtth(EventId(9), 50, 0));

        let next = enqueue_chained(&s, EventId(9));
        assert_eq!(next.event_queue.len(), 2);
        assert_eq!(next.event_queue[0].id, EventId(9));
        assert_eq!(next.event_queue[0].mean_time_to_happen, Some(0));
        assert_eq!(next.event_queue[1].id, EventId(7));
    }

    #[test]
    fn test_into_effect() {
        let effect = EventChain::trigger(5u32).into_effect();
        let mut rng = SmallRng::seed_from_u64(3);
        let next = effect.apply(&state(), &mut rng);
        assert!(next.is_queued(EventId(5)));
    }
}
