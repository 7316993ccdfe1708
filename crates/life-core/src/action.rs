//! Player actions and the effects they perform.
//!
//! An [`Action`] is one choice offered by an event. Its [`Effect`] is a state
//! transformer: it reads the current [`GameState`] and returns a new one,
//! never touching the input. Small effects compose with [`Effect::then`] and
//! [`Effect::sequence`], so event authors build choices out of pieces like
//! "pay 5 coin, gain 1 renown, set a flag".

use life_events::{GameState, ResourceKind, Season, StatKind, TmpValue};
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

type PredicateFn = dyn Fn(&GameState) -> bool + Send + Sync;
type EffectFn = dyn Fn(&GameState, &mut dyn RngCore) -> GameState + Send + Sync;

/// A predicate over game state.
#[derive(Clone)]
pub struct Condition(Arc<PredicateFn>);

impl Condition {
    pub fn new(f: impl Fn(&GameState) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// A condition that always holds.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// A condition that never holds.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Evaluates the condition against a state.
    pub fn holds(&self, state: &GameState) -> bool {
        (self.0)(state)
    }

    pub fn and(self, other: Condition) -> Self {
        Self::new(move |s| self.holds(s) && other.holds(s))
    }

    pub fn or(self, other: Condition) -> Self {
        Self::new(move |s| self.holds(s) || other.holds(s))
    }

    pub fn negate(self) -> Self {
        Self::new(move |s| !self.holds(s))
    }

    pub fn has_flag(flag: impl Into<String>) -> Self {
        let flag = flag.into();
        Self::new(move |s| s.has_flag(&flag))
    }

    pub fn lacks_flag(flag: impl Into<String>) -> Self {
        Self::has_flag(flag).negate()
    }

    pub fn resource_at_least(kind: ResourceKind, amount: u32) -> Self {
        Self::new(move |s| s.resource(kind) >= amount)
    }

    pub fn stat_at_least(kind: StatKind, value: u8) -> Self {
        Self::new(move |s| s.stat(kind) >= value)
    }

    pub fn after_day(day: u32) -> Self {
        Self::new(move |s| s.days_passed >= day)
    }

    pub fn in_season(season: Season) -> Self {
        Self::new(move |s| s.date().season == season)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

/// A state transformer.
#[derive(Clone)]
pub struct Effect(Arc<EffectFn>);

impl Effect {
    pub fn new(f: impl Fn(&GameState, &mut dyn RngCore) -> GameState + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Builds an effect from an in-place edit applied to a copy of the state.
    pub fn update(f: impl Fn(&mut GameState) + Send + Sync + 'static) -> Self {
        Self::new(move |state, _rng| {
            let mut next = state.clone();
            f(&mut next);
            next
        })
    }

    /// Returns the state unchanged.
    pub fn identity() -> Self {
        Self::new(|state, _rng| state.clone())
    }

    /// Applies the effect.
    pub fn apply(&self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        (self.0)(state, rng)
    }

    /// Runs `self`, then `next` on the result.
    pub fn then(self, next: Effect) -> Self {
        Self::new(move |state, rng| {
            let mid = self.apply(state, rng);
            next.apply(&mid, rng)
        })
    }

    /// Runs effects left to right.
    pub fn sequence(effects: Vec<Effect>) -> Self {
        Self::new(move |state, rng| {
            let mut current = state.clone();
            for effect in &effects {
                current = effect.apply(&current, rng);
            }
            current
        })
    }

    /// Runs `effect` only when `condition` holds at application time.
    pub fn when(condition: Condition, effect: Effect) -> Self {
        Self::new(move |state, rng| {
            if condition.holds(state) {
                effect.apply(state, rng)
            } else {
                state.clone()
            }
        })
    }

    pub fn change_resource(kind: ResourceKind, delta: i64) -> Self {
        Self::update(move |s| s.character.resources.change(kind, delta))
    }

    pub fn change_coin(delta: i64) -> Self {
        Self::change_resource(ResourceKind::Coin, delta)
    }

    pub fn change_food(delta: i64) -> Self {
        Self::change_resource(ResourceKind::Food, delta)
    }

    pub fn change_renown(delta: i64) -> Self {
        Self::change_resource(ResourceKind::Renown, delta)
    }

    pub fn change_stat(kind: StatKind, delta: i32) -> Self {
        Self::update(move |s| s.character.stats.change(kind, delta))
    }

    pub fn set_flag(flag: impl Into<String>) -> Self {
        let flag = flag.into();
        Self::update(move |s| {
            s.flags.insert(flag.clone());
        })
    }

    pub fn clear_flag(flag: impl Into<String>) -> Self {
        let flag = flag.into();
        Self::update(move |s| {
            s.flags.remove(&flag);
        })
    }

    pub fn set_tmp(key: impl Into<String>, value: impl Into<TmpValue>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::update(move |s| s.tmp.set(key.clone(), value.clone()))
    }

    pub fn remove_tmp(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::update(move |s| {
            s.tmp.remove(&key);
        })
    }

    /// Appends a line to the game log.
    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::update(move |s| s.push_message(text.clone()))
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}

/// A choice offered by an event.
#[derive(Debug, Clone)]
pub struct Action {
    pub text: String,
    /// Gate on availability; `None` means always available.
    pub condition: Option<Condition>,
    /// State change on selection; `None` is a no-op choice.
    pub perform: Option<Effect>,
}

impl Action {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            condition: None,
            perform: None,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn performs(mut self, effect: Effect) -> Self {
        self.perform = Some(effect);
        self
    }

    /// Checks whether the action may be chosen in this state.
    pub fn is_available(&self, state: &GameState) -> bool {
        self.condition.as_ref().map_or(true, |c| c.holds(state))
    }

    /// Applies the action's effect, or returns an unchanged copy if it has none.
    pub fn apply(&self, state: &GameState, rng: &mut dyn RngCore) -> GameState {
        match &self.perform {
            Some(effect) => effect.apply(state, rng),
            None => state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_events::Character;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        GameState::new(Character::new("Wat"))
    }

    #[test]
    fn test_condition_combinators() {
        let mut s = state();
        s.flags.insert("married".to_string());

        assert!(Condition::has_flag("married").holds(&s));
        assert!(!Condition::lacks_flag("married").holds(&s));
        assert!(Condition::always().and(Condition::has_flag("married")).holds(&s));
        assert!(!Condition::never().and(Condition::always()).holds(&s));
        assert!(Condition::never().or(Condition::always()).holds(&s));
        assert!(Condition::never().negate().holds(&s));
    }

    #[test]
    fn test_effect_does_not_touch_input() {
        let s = state();
        let mut rng = SmallRng::seed_from_u64(1);
        let next = Effect::change_coin(10).apply(&s, &mut rng);
        assert_eq!(s.character.resources.coin(), 0);
        assert_eq!(next.character.resources.coin(), 10);
    }

    #[test]
    fn test_sequence_runs_in_order() {
        let s = state();
        let mut rng = SmallRng::seed_from_u64(1);
        let effect = Effect::sequence(vec![
            Effect::change_coin(10),
            Effect::update(|s| {
                let coin = i64::from(s.character.resources.coin());
                s.tmp.set("coin.snapshot", coin);
            }),
            Effect::change_coin(-3),
        ]);
        let next = effect.apply(&s, &mut rng);
        assert_eq!(next.tmp.get_int("coin.snapshot", 0), 10);
        assert_eq!(next.character.resources.coin(), 7);
    }

    #[test]
    fn test_when_checks_state_at_application() {
        let mut rng = SmallRng::seed_from_u64(1);
        let effect = Effect::when(
            Condition::resource_at_least(ResourceKind::Coin, 5),
            Effect::change_renown(1),
        );

        let poor = state();
        assert_eq!(effect.apply(&poor, &mut rng), poor);

        let rich = Effect::change_coin(5).then(effect).apply(&poor, &mut rng);
        assert_eq!(rich.character.resources.renown(), 1);
    }

    #[test]
    fn test_flag_and_tmp_effects() {
        let mut rng = SmallRng::seed_from_u64(1);
        let s = Effect::set_flag("apprenticed")
            .then(Effect::set_tmp("master.name", "Hild"))
            .then(Effect::message("You took an apprenticeship."))
            .apply(&state(), &mut rng);
        assert!(s.has_flag("apprenticed"));
        assert_eq!(s.tmp.get_text("master.name", ""), "Hild");
        assert_eq!(s.messages.len(), 1);

        let s = Effect::clear_flag("apprenticed")
            .then(Effect::remove_tmp("master.name"))
            .apply(&s, &mut rng);
        assert!(!s.has_flag("apprenticed"));
        assert!(!s.tmp.contains("master.name"));
    }

    #[test]
    fn test_action_without_perform_is_noop() {
        let mut rng = SmallRng::seed_from_u64(1);
        let s = state();
        let action = Action::new("Shrug");
        assert!(action.is_available(&s));
        assert_eq!(action.apply(&s, &mut rng), s);
    }

    #[test]
    fn test_action_condition_gates_availability() {
        let action = Action::new("Bribe the guard")
            .when(Condition::resource_at_least(ResourceKind::Coin, 10))
            .performs(Effect::change_coin(-10));
        assert!(!action.is_available(&state()));
    }
}
