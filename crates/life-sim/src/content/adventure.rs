//! Encounters on the road (2000s).

use life_core::{Action, Condition, Effect, EventChain, EventDefinition};
use life_events::{ResourceKind, StatKind};

pub const STRANGER_ON_THE_ROAD: u32 = 2001;
pub const RIVAL_RETURNS: u32 = 2002;
pub const AMBUSH: u32 = 2101;
pub const HIDDEN_SHRINE: u32 = 2102;
pub const LOST_PURSE: u32 = 2103;
pub const DUEL_WON: u32 = 2104;
pub const DUEL_LOST: u32 = 2105;

fn follow_stranger() -> EventChain {
    EventChain::trigger(AMBUSH)
        .with_weight(2.0)
        .multiply_by_factor(0.5, Condition::stat_at_least(StatKind::Cunning, 6))
        .or_trigger(HIDDEN_SHRINE)
        .only_when(Condition::stat_at_least(StatKind::Piety, 4))
        .or_trigger(LOST_PURSE)
        .only_when(Condition::resource_at_least(ResourceKind::Coin, 5))
}

fn duel() -> EventChain {
    EventChain::trigger(DUEL_WON)
        .multiply_by_factor(2.0, Condition::stat_at_least(StatKind::Strength, 6))
        .multiply_by_factor(1.5, Condition::has_flag("job.smithy"))
        .or_trigger(DUEL_LOST)
}

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::regular(STRANGER_ON_THE_ROAD, "A stranger on the road")
            .with_condition(Condition::after_day(20).and(Condition::lacks_flag("met_stranger")))
            .with_mtth(45)
            .with_text("A hooded figure beckons from the treeline.")
            .with_action(
                Action::new("Follow them").performs(
                    Effect::set_flag("met_stranger").then(follow_stranger().into_effect()),
                ),
            )
            .with_action(Action::new("Walk on").performs(Effect::set_flag("met_stranger"))),
        EventDefinition::regular(RIVAL_RETURNS, "An old rival")
            .with_condition(
                Condition::has_flag("met_stranger")
                    .and(Condition::new(|s| s.tmp.contains("rival.name")).negate()),
            )
            .with_mtth_fn(|s| if s.character.resources.renown() >= 5 { 30 } else { 90 })
            .with_text("Osric, who bullied you as a child, blocks the lane.")
            .with_action(
                Action::new("Accept his challenge")
                    .when(Condition::stat_at_least(StatKind::Strength, 3))
                    .performs(
                        Effect::set_tmp("rival.name", "Osric").then(duel().into_effect()),
                    ),
            )
            .with_action(
                Action::new("Step aside")
                    .performs(Effect::set_tmp("rival.name", "Osric").then(Effect::change_renown(-1))),
            ),
        EventDefinition::triggered(AMBUSH, "Ambush!")
            .with_text("Bandits step out from behind the trees.")
            .with_action(
                Action::new("Fight")
                    .when(Condition::stat_at_least(StatKind::Strength, 4))
                    .performs(
                        Effect::change_renown(3).then(Effect::change_stat(StatKind::Strength, 1)),
                    ),
            )
            .with_action(Action::new("Hand over your purse").performs(Effect::update(|s| {
                let coin = i64::from(s.character.resources.coin());
                s.character.resources.change(ResourceKind::Coin, -(coin / 2));
                s.push_message("The bandits took half your coin.");
            }))),
        EventDefinition::triggered(HIDDEN_SHRINE, "A hidden shrine")
            .with_text("The stranger leaves you at a moss-covered altar.")
            .with_action(Action::new("Pray").performs(Effect::change_stat(StatKind::Piety, 1)))
            .with_action(
                Action::new("Take the offerings")
                    .performs(Effect::change_coin(8).then(Effect::change_stat(StatKind::Piety, -1))),
            ),
        EventDefinition::triggered(LOST_PURSE, "A lighter purse")
            .with_text("When the stranger is gone, so is some of your coin.")
            .with_action(Action::new("Curse your luck").performs(Effect::change_coin(-5))),
        EventDefinition::triggered(DUEL_WON, "Osric yields")
            .with_action(Action::new("Savor it").performs(
                Effect::change_renown(4).then(Effect::set_flag("rival.beaten")),
            )),
        EventDefinition::triggered(DUEL_LOST, "Face in the mud")
            .with_action(Action::new("Limp home").performs(
                Effect::change_renown(-2).then(Effect::change_stat(StatKind::Strength, 1)),
            )),
    ]
}
