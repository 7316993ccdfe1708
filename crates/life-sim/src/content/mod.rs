//! Authored event content.
//!
//! Each module owns a block of ids:
//! - 1000s: [`jobs`]
//! - 2000s: [`adventure`]
//! - 3000s: [`focus`]
//! - 4000s: [`town`]
//!
//! Triggered follow-ups sit 100 above their storyline's regular events.

pub mod adventure;
pub mod focus;
pub mod jobs;
pub mod town;

use life_core::{Catalog, CatalogError};

/// Assembles every content module into one validated catalog.
pub fn build_catalog() -> Result<Catalog, CatalogError> {
    let catalog = Catalog::from_modules([
        jobs::events(),
        adventure::events(),
        focus::events(),
        town::events(),
    ])?;
    tracing::info!(events = catalog.len(), "built event catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_events::EventId;

    #[test]
    fn test_catalog_builds() {
        let catalog = build_catalog().unwrap();
        assert!(catalog.len() > 20);
    }

    #[test]
    fn test_ids_stay_in_their_blocks() {
        let blocks = [
            (1000, jobs::events()),
            (2000, adventure::events()),
            (3000, focus::events()),
            (4000, town::events()),
        ];
        for (block, events) in blocks {
            for event in events {
                assert_eq!(event.id.block(), block, "{} is outside block {}", event.id, block);
            }
        }
    }

    #[test]
    fn test_every_chain_target_exists() {
        let catalog = build_catalog().unwrap();
        for id in [
            jobs::DISMISSED,
            jobs::GRUDGING_RESPECT,
            adventure::AMBUSH,
            adventure::HIDDEN_SHRINE,
            adventure::LOST_PURSE,
            adventure::DUEL_WON,
            adventure::DUEL_LOST,
        ] {
            assert!(catalog.contains(EventId(id)), "missing chain target {}", id);
        }
    }

    #[test]
    fn test_every_event_offers_an_unconditional_action() {
        // The autopilot must never be stuck on an event
        let catalog = build_catalog().unwrap();
        for event in catalog.events() {
            assert!(
                event.actions.iter().any(|a| a.condition.is_none()),
                "{} has no unconditional action",
                event.id
            );
        }
    }
}
