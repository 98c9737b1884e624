//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` is one frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn / fire order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod combat;
pub mod cooldown;
pub mod economy;
pub mod movement;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{first_hit, overlaps};
pub use cooldown::Cooldown;
pub use economy::{buy_upgrade, spawn_alien, upgrade_price};
pub use rect::Rect;
pub use state::{
    Alien, AlienBehavior, AlienKind, Faction, GameEvent, GamePhase, GameState, Mothership,
    MovementMode, Player, Projectile, RemovalCause, Side, UpgradeCounts, UpgradeTrack,
};
pub use tick::{TickInput, tick};
