//! Employment storyline (1000s).

use life_core::{Action, Condition, Effect, EventChain, EventDefinition};
use life_events::{GameState, ResourceKind, StatKind};

pub const LOOKING_FOR_WORK: u32 = 1001;
pub const FOREMANS_TEMPER: u32 = 1002;
pub const PAYDAY: u32 = 1003;
pub const DISMISSED: u32 = 1101;
pub const GRUDGING_RESPECT: u32 = 1102;

/// Coin earned per payday in the current job.
fn wage(state: &GameState) -> i64 {
    let base = if state.has_flag("job.smithy") {
        6
    } else if state.has_flag("job.docks") {
        4
    } else {
        0
    };
    base + i64::from(state.stat(StatKind::Diligence)) / 3
}

fn take_job(flag: &'static str, text: &'static str) -> Effect {
    Effect::set_flag("employed")
        .then(Effect::set_flag(flag))
        .then(Effect::update(|s| {
            let day = s.days_passed;
            s.tmp.set("job.started_day", day);
        }))
        .then(Effect::message(text))
}

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::regular(LOOKING_FOR_WORK, "Looking for work")
            .with_condition(Condition::lacks_flag("employed"))
            .with_mtth(10)
            .with_text_fn(|s| {
                format!(
                    "{} has {} coin left. The smithy and the docks are both hiring.",
                    s.character.name,
                    s.resource(ResourceKind::Coin)
                )
            })
            .with_action(
                Action::new("Apprentice at the smithy")
                    .when(Condition::stat_at_least(StatKind::Diligence, 3))
                    .performs(take_job("job.smithy", "You took an apprenticeship at the smithy.")),
            )
            .with_action(
                Action::new("Haul crates at the docks")
                    .performs(take_job("job.docks", "You started work at the docks.")),
            )
            .with_action(Action::new("Not yet")),
        EventDefinition::regular(PAYDAY, "Payday")
            .in_background()
            .with_condition(Condition::has_flag("employed"))
            .with_fixed_delay(7)
            .with_action(Action::new("Collect wages").performs(Effect::update(|s| {
                let pay = wage(s);
                s.character.resources.change(ResourceKind::Coin, pay);
                s.tmp.update_int("job.total_earned", 0, |total| total + pay);
            }))),
        EventDefinition::regular(FOREMANS_TEMPER, "The foreman's temper")
            .with_condition(Condition::has_flag("job.docks"))
            .with_mtth(60)
            .with_text("The foreman blames you for a dropped crate.")
            .with_action(Action::new("Keep your head down"))
            .with_action(
                Action::new("Talk back").performs(
                    EventChain::trigger(DISMISSED)
                        .or_trigger(GRUDGING_RESPECT)
                        .multiply_by_factor(2.0, Condition::stat_at_least(StatKind::Charisma, 6))
                        // Newcomers get less slack
                        .multiply_by_factor(
                            0.5,
                            Condition::new(|s| s.tmp.get_int("job.total_earned", 0) < 20),
                        )
                        .into_effect(),
                ),
            ),
        EventDefinition::triggered(DISMISSED, "Dismissed")
            .with_text("The foreman points at the gate.")
            .with_action(
                Action::new("Pack your things").performs(
                    Effect::clear_flag("employed")
                        .then(Effect::clear_flag("job.docks"))
                        .then(Effect::remove_tmp("job.started_day"))
                        .then(Effect::change_renown(-1)),
                ),
            ),
        EventDefinition::triggered(GRUDGING_RESPECT, "Grudging respect")
            .with_text("The foreman laughs and claps you on the shoulder.")
            .with_action(Action::new("Get back to work").performs(Effect::change_renown(2))),
    ]
}
