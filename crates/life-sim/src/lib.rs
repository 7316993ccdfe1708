//! Headless shell around the event engine.
//!
//! Bundles the authored content catalog, an autopilot that answers events,
//! a JSON save slot, and the day loop that ties them together.

pub mod autopilot;
pub mod content;
pub mod save;
pub mod simulation;

pub use autopilot::Autopilot;
pub use content::build_catalog;
pub use save::{SaveError, SaveStore};
pub use simulation::{RunStats, Simulation};
