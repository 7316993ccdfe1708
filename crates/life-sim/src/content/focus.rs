//! Long-running personal focus (3000s).
//!
//! The chosen focus lives in the temporary store under `focus.kind`, so a
//! later event can read it back without a flag per option.

use life_core::{Action, Condition, Effect, EventDefinition};
use life_events::{GameState, StatKind};

pub const CHOOSE_FOCUS: u32 = 3001;
pub const FOCUS_PROGRESS: u32 = 3002;
pub const ABANDON_FOCUS: u32 = 3003;

const FOCUS_KEY: &str = "focus.kind";
const PROGRESS_KEY: &str = "focus.progress";

/// Stat trained by a focus, if the name is known.
fn focus_stat(kind: &str) -> Option<StatKind> {
    match kind {
        "letters" => Some(StatKind::Cunning),
        "arms" => Some(StatKind::Strength),
        "society" => Some(StatKind::Charisma),
        "devotion" => Some(StatKind::Piety),
        _ => None,
    }
}

fn has_focus() -> Condition {
    Condition::new(|s| s.tmp.contains(FOCUS_KEY))
}

fn pick(text: &'static str, kind: &'static str) -> Action {
    Action::new(text).performs(Effect::update(move |s| {
        s.tmp.set(FOCUS_KEY, kind);
        s.tmp.set(PROGRESS_KEY, 0i64);
        s.push_message(format!("You set your mind to {}.", kind));
    }))
}

fn train(state: &mut GameState) {
    let kind = state.tmp.get_text(FOCUS_KEY, "");
    let Some(stat) = focus_stat(&kind) else {
        tracing::warn!(focus = %kind, "unknown focus in save; clearing it");
        state.tmp.remove(FOCUS_KEY);
        return;
    };
    let progress = state.tmp.update_int(PROGRESS_KEY, 0, |p| p + 1);
    // Every third month of practice pays off
    if progress % 3 == 0 {
        state.character.stats.change(stat, 1);
        state.push_message(format!("Your {} is paying off.", kind));
    }
}

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::regular(CHOOSE_FOCUS, "Choosing a focus")
            .with_condition(has_focus().negate())
            .with_mtth(15)
            .with_text("How will you spend your evenings?")
            .with_action(pick("Study letters", "letters"))
            .with_action(
                pick("Train with arms", "arms")
                    .when(Condition::stat_at_least(StatKind::Strength, 2)),
            )
            .with_action(pick("Cultivate society", "society"))
            .with_action(pick("Keep vigil", "devotion")),
        EventDefinition::regular(FOCUS_PROGRESS, "Evenings of practice")
            .in_background()
            .with_condition(has_focus())
            .with_fixed_delay(30)
            .with_action(Action::new("Practice").performs(Effect::update(train))),
        EventDefinition::regular(ABANDON_FOCUS, "Restless evenings")
            .with_condition(has_focus().and(Condition::new(|s| {
                s.tmp.get_int(PROGRESS_KEY, 0) >= 6
            })))
            .with_mtth(120)
            .with_text_fn(|s| {
                format!(
                    "After {} months of {}, you wonder about something new.",
                    s.tmp.get_int(PROGRESS_KEY, 0),
                    s.tmp.get_text(FOCUS_KEY, "practice")
                )
            })
            .with_action(
                Action::new("Put it aside")
                    .performs(Effect::remove_tmp(FOCUS_KEY).then(Effect::remove_tmp(PROGRESS_KEY))),
            )
            .with_action(Action::new("Stay the course").performs(Effect::change_stat(StatKind::Diligence, 1))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_events::Character;

    #[test]
    fn test_train_raises_stat_every_third_session() {
        let mut state = GameState::new(Character::new("Agnes"));
        state.tmp.set(FOCUS_KEY, "letters");
        let before = state.stat(StatKind::Cunning);

        train(&mut state);
        train(&mut state);
        assert_eq!(state.stat(StatKind::Cunning), before);
        train(&mut state);
        assert_eq!(state.stat(StatKind::Cunning), before + 1);
        assert_eq!(state.tmp.get_int(PROGRESS_KEY, 0), 3);
    }

    #[test]
    fn test_train_clears_unknown_focus() {
        let mut state = GameState::new(Character::new("Agnes"));
        state.tmp.set(FOCUS_KEY, "juggling");
        train(&mut state);
        assert!(!state.tmp.contains(FOCUS_KEY));
    }
}
