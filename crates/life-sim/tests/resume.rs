//! Resuming from saved games.

use life_core::{LifeConfig, Scheduler};
use life_events::{fixtures, EventId};
use life_sim::{build_catalog, SaveStore, Simulation};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;
use tempfile::tempdir;

fn simulation() -> Simulation {
    let config = LifeConfig::default();
    let scheduler = Scheduler::new(Arc::new(build_catalog().unwrap()), config.scheduler);
    Simulation::new(scheduler, config.simulation)
}

#[test]
fn test_resume_sample_save() {
    let dir = tempdir().unwrap();
    let store = SaveStore::new(dir.path().join("agnes.json"));
    store.save(&fixtures::sample_state()).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.active_event, Some(EventId(1002)));

    // The pending event is answered on the first day back
    let mut sim = simulation();
    let mut rng = SmallRng::seed_from_u64(5);
    let next = sim.step(&loaded, &mut rng);
    assert_eq!(next.days_passed, 96);
    assert_eq!(sim.stats().actions_taken, 1);
}

#[test]
fn test_chained_entry_surfaces_after_resume() {
    let mut state = fixtures::sample_state();
    state.active_event = None;

    // The chained ambush sits at the front with zero delay
    let mut sim = simulation();
    let mut rng = SmallRng::seed_from_u64(5);
    let next = sim.scheduler().tick(&state, &mut rng);
    assert_eq!(next.active_event, Some(EventId(2101)));

    let after = sim.step(&state, &mut SmallRng::seed_from_u64(5));
    assert!(!after.is_queued(EventId(2101)));
}

#[test]
fn test_autosave_then_resume_continues() {
    let dir = tempdir().unwrap();
    let store = SaveStore::new(dir.path().join("game.json"));

    let mut first = simulation().with_save_store(store.clone());
    let mut rng = SmallRng::seed_from_u64(9);
    let start = first.new_game("Agnes");
    first.run(&start, 45, &mut rng);

    let saved = store.load().unwrap();
    assert_eq!(saved.days_passed, 30);

    let mut second = simulation();
    let resumed = second.run(&saved, 30, &mut SmallRng::seed_from_u64(9));
    assert_eq!(resumed.days_passed, 60);
    assert_eq!(resumed.character.name, "Agnes");
}
