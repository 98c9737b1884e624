//! Rule toggles and demo options
//!
//! Loaded together with the balance sheet from an optional JSON file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which rules are active for a round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Mothership is driven by the built-in AI instead of a second player
    pub commander_ai: bool,
    /// Mothership creeps toward random horizontal targets
    pub commander_drift: bool,
    /// Alien shots can hit other aliens (never the one that fired)
    pub friendly_fire: bool,
    /// Start each round with a preset formation of aliens
    pub opening_wave: bool,
    /// Player ship starts with autofire enabled
    pub autofire_on_start: bool,

    // === Demo runner ===
    /// Seed for the first round (later rounds derive from it)
    pub seed: u64,
    /// Rounds played by the headless runner
    pub demo_rounds: u32,
    /// Step limit per demo round before it is called a draw
    pub demo_max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            commander_ai: true,
            commander_drift: true,
            friendly_fire: true,
            opening_wave: true,
            autofire_on_start: false,

            seed: 0x5EED_1978,
            demo_rounds: 3,
            demo_max_ticks: 60 * 60 * 10,
        }
    }
}

/// Everything a config file may carry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settings: Settings,
    pub tuning: Tuning,
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Failure to produce a usable configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read config: {err}"),
            Self::Parse(err) => write!(f, "malformed config: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
