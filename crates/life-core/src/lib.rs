//! Event engine for the town life simulation.
//!
//! Hundreds of authored events compete for the player's attention. This
//! crate decides which of them are eligible, when an eligible event fires,
//! and which follow-up a weighted chain picks.
//!
//! # Architecture
//!
//! ```text
//!  content modules ──▶ Catalog ──▶ Scheduler ◀── tick driver
//!                                    │   ▲
//!                     GameState ◀────┘   └──── Action / EventChain effects
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Event definitions and the validated, indexed catalog
//! - [`action`]: Conditions, composable effects, and player actions
//! - [`scheduler`]: Queue reconciliation and due-event resolution
//! - [`chain`]: Weighted follow-up selection
//! - [`config`]: TOML configuration

pub mod action;
pub mod catalog;
pub mod chain;
pub mod config;
pub mod scheduler;

pub use action::{Action, Condition, Effect};
pub use catalog::{Catalog, CatalogError, EventDefinition};
pub use chain::{enqueue_chained, ChainCandidate, EventChain, WeightFactor};
pub use config::{
    default_config_toml, ConfigError, LifeConfig, SchedulerConfig, SimulationConfig,
    TomlSerializeError,
};
pub use scheduler::{fuzzy_up_mtth, hazard_chance, ActionError, Scheduler};

/// Errors that can occur while setting up the engine.
#[derive(Debug)]
pub enum LifeError {
    /// Error loading configuration
    Config(ConfigError),
    /// Error building the event catalog
    Catalog(CatalogError),
}

impl std::fmt::Display for LifeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifeError::Config(e) => write!(f, "Config error: {}", e),
            LifeError::Catalog(e) => write!(f, "Catalog error: {}", e),
        }
    }
}

impl std::error::Error for LifeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifeError::Config(e) => Some(e),
            LifeError::Catalog(e) => Some(e),
        }
    }
}

impl From<ConfigError> for LifeError {
    fn from(e: ConfigError) -> Self {
        LifeError::Config(e)
    }
}

impl From<CatalogError> for LifeError {
    fn from(e: CatalogError) -> Self {
        LifeError::Catalog(e)
    }
}
