//! Configuration loading.
//!
//! Scheduler tuning and simulation settings are loaded from a TOML file.
//! Every section and field is optional; missing values fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeConfig {
    /// Event timing settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Tick driver settings
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl LifeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Serializes this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }
}

/// Event timing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// MTTH days per step of fuzz spread
    pub fuzz_divisor: f64,
    /// Upper limit on the fuzz spread, in days
    pub max_fuzz_spread: u32,
    /// Events at or below this MTTH are checked every half-MTTH
    pub fast_event_threshold_days: u32,
    /// Fraction of MTTH between checks for slower events
    pub slow_check_fraction: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fuzz_divisor: 25.0,
            max_fuzz_spread: 1,
            fast_event_threshold_days: 30,
            slow_check_fraction: 0.1,
        }
    }
}

impl SchedulerConfig {
    /// Largest offset the fuzz may apply to a mean time to happen.
    pub fn fuzz_spread(&self, mtth: u32) -> u32 {
        if self.fuzz_divisor <= 0.0 {
            return 0;
        }
        let steps = (f64::from(mtth) / self.fuzz_divisor).round() as u32;
        steps.min(self.max_fuzz_spread)
    }

    /// Days between hazard checks for an event with this mean time to happen.
    pub fn check_interval(&self, mtth: u32) -> u32 {
        if mtth <= self.fast_event_threshold_days {
            (mtth / 2).max(1)
        } else {
            ((f64::from(mtth) * self.slow_check_fraction).round() as u32).max(1)
        }
    }
}

/// Tick driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Days between automatic saves
    pub autosave_interval_days: u32,
    /// Messages kept in the game log
    pub message_limit: usize,
    pub starting_coin: u32,
    pub starting_food: u32,
    pub starting_renown: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            autosave_interval_days: 30,
            message_limit: 50,
            starting_coin: 20,
            starting_food: 10,
            starting_renown: 0,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Town Life Configuration

[scheduler]
fuzz_divisor = 25.0
max_fuzz_spread = 1
fast_event_threshold_days = 30
slow_check_fraction = 0.1

[simulation]
autosave_interval_days = 30
message_limit = 50
starting_coin = 20
starting_food = 10
starting_renown = 0
"#
    .to_string()
}
