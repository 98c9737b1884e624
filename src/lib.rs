//! Defender vs Mothership - a two-sided Space Invaders simulation
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, economy, combat, game phases)
//! - `snapshot`: Read-only per-frame view for whatever draws the game
//! - `session`: Round lifecycle around a `GameState` (restart, history)
//! - `tuning`: Data-driven game balance
//! - `settings`: Rule toggles, demo options and config loading
//! - `scoreboard`: In-memory history of finished rounds

pub mod scoreboard;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use scoreboard::{RoundHistory, RoundRecord};
pub use session::Session;
pub use settings::{ConfigError, GameConfig, Settings};
pub use snapshot::Snapshot;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation steps per second (every cooldown is counted in steps)
    pub const SIM_HZ: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Projectile hitbox
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;

    /// Hard cap on simultaneously alive aliens (commander AI respects it)
    pub const MAX_ALIENS: usize = 20;

    /// Minimum ticks between autofire toggles so a held key doesn't flicker
    pub const AUTOFIRE_TOGGLE_TICKS: u32 = 15;
}
