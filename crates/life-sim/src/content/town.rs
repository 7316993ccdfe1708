//! Town life and the turning of the seasons (4000s).

use life_core::{Action, Condition, Effect, EventDefinition};
use life_events::{ResourceKind, Season, StatKind};

pub const MARKET_DAY: u32 = 4001;
pub const HARVEST_FESTIVAL: u32 = 4002;
pub const HUNGER: u32 = 4003;
pub const COUNCIL_SEAT: u32 = 4004;
pub const PROMISE_RECKONING: u32 = 4005;
pub const WINTER_TITHE: u32 = 4006;

const FESTIVAL_YEAR_KEY: &str = "festival.last_year";
const PROMISE_KEY: &str = "campaign.promised_renown";

fn festival_pending() -> Condition {
    Condition::in_season(Season::Autumn).and(Condition::new(|s| {
        s.tmp.get_int(FESTIVAL_YEAR_KEY, 0) < i64::from(s.date().year)
    }))
}

fn mark_festival() -> Effect {
    Effect::update(|s| {
        let year = s.date().year;
        s.tmp.set(FESTIVAL_YEAR_KEY, year);
    })
}

pub fn events() -> Vec<EventDefinition> {
    vec![
        // Eating and shopping every few days
        EventDefinition::regular(MARKET_DAY, "Market day")
            .in_background()
            .with_fixed_delay(5)
            .with_action(Action::new("Buy provisions").performs(Effect::update(|s| {
                s.character.resources.change(ResourceKind::Food, -1);
                if s.character.resources.can_afford(ResourceKind::Coin, 3) {
                    s.character.resources.change(ResourceKind::Coin, -3);
                    s.character.resources.change(ResourceKind::Food, 2);
                }
            }))),
        EventDefinition::regular(HARVEST_FESTIVAL, "Harvest festival")
            .with_condition(festival_pending())
            .with_mtth(10)
            .with_text_fn(|s| format!("The year {} harvest is in. Lanterns hang over the square.", s.date().year))
            .with_action(
                Action::new("Join the dancing").performs(
                    mark_festival()
                        .then(Effect::change_renown(1))
                        .then(Effect::change_stat(StatKind::Charisma, 1)),
                ),
            )
            .with_action(
                Action::new("Sell pies at the fair")
                    .when(Condition::resource_at_least(ResourceKind::Food, 4))
                    .performs(mark_festival().then(Effect::change_food(-4)).then(Effect::change_coin(10))),
            )
            .with_action(Action::new("Stay home").performs(mark_festival())),
        EventDefinition::regular(HUNGER, "An empty larder")
            .with_condition(Condition::new(|s| s.character.resources.food() == 0))
            .with_mtth(3)
            .with_text("Your stomach growls. There is nothing left to eat.")
            .with_action(
                Action::new("Beg at the church")
                    .performs(Effect::change_food(3).then(Effect::change_renown(-1))),
            )
            .with_action(
                Action::new("Go hungry").performs(Effect::change_stat(StatKind::Strength, -1)),
            ),
        EventDefinition::regular(COUNCIL_SEAT, "A seat on the council")
            .with_condition(
                Condition::resource_at_least(ResourceKind::Renown, 10)
                    .and(Condition::lacks_flag("campaign.promised")),
            )
            .with_mtth(90)
            .with_text("The aldermen wonder whether you might stand for the council.")
            .with_action(Action::new("Promise to mend the walls").performs(Effect::update(|s| {
                let renown = s.character.resources.renown();
                s.flags.insert("campaign.promised".to_string());
                s.tmp.set(PROMISE_KEY, renown);
            })))
            .with_action(Action::new("Decline").performs(Effect::set_flag("campaign.promised"))),
        // Fires sixty days after the promise whether the player likes it or not
        EventDefinition::regular(PROMISE_RECKONING, "The walls")
            .in_background()
            .with_condition(Condition::new(|s| s.tmp.contains(PROMISE_KEY)))
            .with_fixed_delay(60)
            .with_action(Action::new("Answer for it").performs(Effect::update(|s| {
                let promised = s.tmp.get_int(PROMISE_KEY, 0);
                let renown = i64::from(s.character.resources.renown());
                if renown >= promised + 5 {
                    s.flags.insert("council.member".to_string());
                    s.push_message("The walls stand firm. You are elected to the council.");
                } else {
                    s.character.resources.change(ResourceKind::Renown, -3);
                    s.push_message("The walls still crumble. The town remembers your promise.");
                }
                s.tmp.remove(PROMISE_KEY);
            }))),
        EventDefinition::regular(WINTER_TITHE, "The winter tithe")
            .in_background()
            .with_condition(Condition::in_season(Season::Winter))
            .with_fixed_delay(20)
            .with_action(Action::new("Pay the tithe").performs(Effect::update(|s| {
                let tithe = i64::from(s.character.resources.coin() / 10);
                s.character.resources.change(ResourceKind::Coin, -tithe);
            }))),
    ]
}
