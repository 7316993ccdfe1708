//! Resource and stat model.
//!
//! Bounded counters for the character's holdings and 0-10 character stats.
//! Fields are private and every mutator clamps, so no sequence of effects
//! can push a value out of range. Deserialization clamps too, so a
//! hand-edited save cannot smuggle one in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for any resource counter.
pub const RESOURCE_CAP: u32 = 1_000_000;

/// Lowest value a stat can take.
pub const STAT_MIN: u8 = 0;

/// Highest value a stat can take.
pub const STAT_MAX: u8 = 10;

/// Kinds of countable resource the character owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Coin,
    Food,
    Renown,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Coin => write!(f, "coin"),
            ResourceKind::Food => write!(f, "food"),
            ResourceKind::Renown => write!(f, "renown"),
        }
    }
}

/// The character's holdings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawResources")]
pub struct Resources {
    coin: u32,
    food: u32,
    renown: u32,
}

#[derive(Deserialize)]
struct RawResources {
    #[serde(default)]
    coin: u32,
    #[serde(default)]
    food: u32,
    #[serde(default)]
    renown: u32,
}

impl From<RawResources> for Resources {
    fn from(raw: RawResources) -> Self {
        Resources::new(raw.coin, raw.food, raw.renown)
    }
}

impl Resources {
    /// Creates a resource set with the given starting values.
    pub fn new(coin: u32, food: u32, renown: u32) -> Self {
        Self {
            coin: coin.min(RESOURCE_CAP),
            food: food.min(RESOURCE_CAP),
            renown: renown.min(RESOURCE_CAP),
        }
    }

    /// Returns the current value of a resource.
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Coin => self.coin,
            ResourceKind::Food => self.food,
            ResourceKind::Renown => self.renown,
        }
    }

    pub fn coin(&self) -> u32 {
        self.coin
    }

    pub fn food(&self) -> u32 {
        self.food
    }

    pub fn renown(&self) -> u32 {
        self.renown
    }

    fn slot(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Coin => &mut self.coin,
            ResourceKind::Food => &mut self.food,
            ResourceKind::Renown => &mut self.renown,
        }
    }

    /// Sets a resource, capped at `RESOURCE_CAP`.
    pub fn set(&mut self, kind: ResourceKind, value: u32) {
        *self.slot(kind) = value.min(RESOURCE_CAP);
    }

    /// Adds `delta` (possibly negative) to a resource, clamped to `[0, RESOURCE_CAP]`.
    pub fn change(&mut self, kind: ResourceKind, delta: i64) {
        let slot = self.slot(kind);
        *slot = i64::from(*slot)
            .saturating_add(delta)
            .clamp(0, i64::from(RESOURCE_CAP)) as u32;
    }

    /// Checks whether at least `amount` of a resource is available.
    pub fn can_afford(&self, kind: ResourceKind, amount: u32) -> bool {
        self.get(kind) >= amount
    }
}

/// Character stats, each kept in `[STAT_MIN, STAT_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Strength,
    Cunning,
    Charisma,
    Diligence,
    Piety,
}

impl StatKind {
    /// All stats, in display order.
    pub const ALL: [StatKind; 5] = [
        StatKind::Strength,
        StatKind::Cunning,
        StatKind::Charisma,
        StatKind::Diligence,
        StatKind::Piety,
    ];
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatKind::Strength => write!(f, "strength"),
            StatKind::Cunning => write!(f, "cunning"),
            StatKind::Charisma => write!(f, "charisma"),
            StatKind::Diligence => write!(f, "diligence"),
            StatKind::Piety => write!(f, "piety"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStats")]
pub struct Stats {
    strength: u8,
    cunning: u8,
    charisma: u8,
    diligence: u8,
    piety: u8,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawStats {
    strength: u8,
    cunning: u8,
    charisma: u8,
    diligence: u8,
    piety: u8,
}

impl Default for RawStats {
    fn default() -> Self {
        let stats = Stats::default();
        Self {
            strength: stats.strength,
            cunning: stats.cunning,
            charisma: stats.charisma,
            diligence: stats.diligence,
            piety: stats.piety,
        }
    }
}

impl From<RawStats> for Stats {
    fn from(raw: RawStats) -> Self {
        let mut stats = Stats::default();
        stats.set(StatKind::Strength, i32::from(raw.strength));
        stats.set(StatKind::Cunning, i32::from(raw.cunning));
        stats.set(StatKind::Charisma, i32::from(raw.charisma));
        stats.set(StatKind::Diligence, i32::from(raw.diligence));
        stats.set(StatKind::Piety, i32::from(raw.piety));
        stats
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: 3,
            cunning: 3,
            charisma: 3,
            diligence: 3,
            piety: 3,
        }
    }
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Cunning => self.cunning,
            StatKind::Charisma => self.charisma,
            StatKind::Diligence => self.diligence,
            StatKind::Piety => self.piety,
        }
    }

    /// Sets a stat, clamped to the valid range.
    pub fn set(&mut self, kind: StatKind, value: i32) {
        let clamped = value.clamp(i32::from(STAT_MIN), i32::from(STAT_MAX)) as u8;
        match kind {
            StatKind::Strength => self.strength = clamped,
            StatKind::Cunning => self.cunning = clamped,
            StatKind::Charisma => self.charisma = clamped,
            StatKind::Diligence => self.diligence = clamped,
            StatKind::Piety => self.piety = clamped,
        }
    }

    /// Adds `delta` to a stat, clamped to the valid range.
    pub fn change(&mut self, kind: StatKind, delta: i32) {
        let current = i32::from(self.get(kind));
        self.set(kind, current.saturating_add(delta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_change_clamps_at_zero() {
        let mut res = Resources::new(5, 0, 0);
        res.change(ResourceKind::Coin, -20);
        assert_eq!(res.coin(), 0);
    }

    #[test]
    fn test_resource_change_clamps_at_cap() {
        let mut res = Resources::new(RESOURCE_CAP - 1, 0, 0);
        res.change(ResourceKind::Coin, 50);
        assert_eq!(res.coin(), RESOURCE_CAP);
    }

    #[test]
    fn test_resource_get_matches_fields() {
        let mut res = Resources::new(10, 20, 30);
        res.change(ResourceKind::Food, 5);
        assert_eq!(res.get(ResourceKind::Coin), 10);
        assert_eq!(res.get(ResourceKind::Food), 25);
        assert_eq!(res.get(ResourceKind::Renown), 30);
        assert!(res.can_afford(ResourceKind::Food, 25));
        assert!(!res.can_afford(ResourceKind::Food, 26));
    }

    #[test]
    fn test_stat_change_clamps() {
        let mut stats = Stats::default();
        stats.change(StatKind::Charisma, 20);
        assert_eq!(stats.get(StatKind::Charisma), STAT_MAX);
        stats.change(StatKind::Charisma, -50);
        assert_eq!(stats.get(StatKind::Charisma), STAT_MIN);
    }

    #[test]
    fn test_extreme_deltas_saturate() {
        let mut res = Resources::new(10, 0, 0);
        res.change(ResourceKind::Coin, i64::MAX);
        assert_eq!(res.coin(), RESOURCE_CAP);
        res.change(ResourceKind::Coin, i64::MIN);
        assert_eq!(res.coin(), 0);

        let mut stats = Stats::default();
        stats.change(StatKind::Piety, i32::MAX);
        assert_eq!(stats.get(StatKind::Piety), STAT_MAX);
        stats.change(StatKind::Piety, i32::MIN);
        assert_eq!(stats.get(StatKind::Piety), STAT_MIN);
    }

    #[test]
    fn test_set_respects_bounds() {
        let mut res = Resources::default();
        res.set(ResourceKind::Renown, u32::MAX);
        assert_eq!(res.renown(), RESOURCE_CAP);

        let mut stats = Stats::default();
        stats.set(StatKind::Strength, 99);
        assert_eq!(stats.get(StatKind::Strength), STAT_MAX);
    }

    #[test]
    fn test_out_of_range_save_values_are_clamped() {
        let res: Resources =
            serde_json::from_str(r#"{"coin": 4000000000, "food": 3}"#).unwrap();
        assert_eq!(res.coin(), RESOURCE_CAP);
        assert_eq!(res.food(), 3);
        assert_eq!(res.renown(), 0);

        let stats: Stats = serde_json::from_str(r#"{"strength": 200, "piety": 7}"#).unwrap();
        assert_eq!(stats.get(StatKind::Strength), STAT_MAX);
        assert_eq!(stats.get(StatKind::Piety), 7);
        assert_eq!(stats.get(StatKind::Cunning), 3);
    }

    #[test]
    fn test_round_trip_keeps_field_names() {
        let res = Resources::new(1, 2, 3);
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"coin":1,"food":2,"renown":3}"#);
        assert_eq!(serde_json::from_str::<Resources>(&json).unwrap(), res);
    }

    #[test]
    fn test_stat_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&StatKind::Diligence).unwrap(),
            r#""diligence""#
        );
        assert_eq!(
            serde_json::to_string(&ResourceKind::Renown).unwrap(),
            r#""renown""#
        );
    }
}
