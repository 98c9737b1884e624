//! Data-driven game balance
//!
//! Every number the simulation uses for sizes, speeds, health, prices and
//! timers lives here, so a JSON file can rebalance a round without touching
//! code. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_WIDTH;
use crate::settings::ConfigError;

/// Stats shared by every alien kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlienStats {
    pub width: f32,
    pub height: f32,
    pub health: u32,
    /// Horizontal patrol speed (pixels per step)
    pub speed: f32,
    /// Damage dealt to the player on body contact
    pub contact_damage: u32,
    /// Money credited to the player when a defender shot kills it
    pub bounty: u32,
    /// Price the mothership pays to launch it
    pub cost: u32,
    /// Mothership spawn cooldown after launching it (steps)
    pub spawn_cooldown: u32,
}

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Gap between the ship's top edge and the bottom of the screen
    pub bottom_margin: f32,
    pub health: u32,
    pub move_speed: f32,
    /// Shots per second before upgrades
    pub reload_speed: f32,
    pub bullet_speed: f32,
    pub bullet_damage: u32,
    pub starting_money: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 30.0,
            bottom_margin: 50.0,
            health: 100,
            move_speed: 5.0,
            reload_speed: 1.0,
            bullet_speed: 10.0,
            bullet_damage: 1,
            starting_money: 100,
        }
    }
}

/// Mothership tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MothershipTuning {
    pub width: f32,
    pub height: f32,
    pub top_margin: f32,
    pub health: u32,
    pub starting_money: u32,
    /// Steps between income payouts
    pub income_interval_ticks: u32,
    /// Payout before growth is applied
    pub income_base: u32,
    /// Payout multiplier growth per payout already made, in thousandths
    pub income_growth_permille: u32,
    /// Upper bound of the payout multiplier, in thousandths
    pub income_cap_permille: u32,
    /// Horizontal creep speed while drifting (pixels per step)
    pub drift_speed: f32,
    /// Steps between drift target picks
    pub drift_retarget_ticks: u32,
}

impl Default for MothershipTuning {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 60.0,
            top_margin: 20.0,
            health: 500,
            starting_money: 200,
            income_interval_ticks: 30,
            income_base: 25,
            income_growth_permille: 20,
            income_cap_permille: 3000,
            drift_speed: 1.0,
            drift_retarget_ticks: 120,
        }
    }
}

/// Exponential price curve for one upgrade track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub base: u32,
    pub rate: f64,
}

impl UpgradeCost {
    /// Price after `purchases` successful buys: `base * rate^purchases`,
    /// rounded to the nearest whole unit
    pub fn price(&self, purchases: u32) -> u32 {
        let exponent = i32::try_from(purchases).unwrap_or(i32::MAX);
        (self.base as f64 * self.rate.powi(exponent)).round() as u32
    }
}

/// Upgrade shop tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    pub reload: UpgradeCost,
    pub max_health: UpgradeCost,
    pub damage: UpgradeCost,
    /// Shots per second gained per reload upgrade
    pub reload_step: f32,
    /// Max health gained per health upgrade
    pub max_health_step: u32,
    /// Bullet damage gained per damage upgrade
    pub damage_step: u32,
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            reload: UpgradeCost { base: 100, rate: 1.5 },
            max_health: UpgradeCost { base: 80, rate: 1.4 },
            damage: UpgradeCost { base: 150, rate: 1.6 },
            reload_step: 0.5,
            max_health_step: 25,
            damage_step: 1,
        }
    }
}

/// Per-kind behaviour knobs that don't fit `AlienStats`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorTuning {
    /// Vertical step taken each time a patrolling alien bounces off an edge
    pub descent_step: f32,
    /// Extra downward drift per step for patrolling squids
    pub squid_sink_speed: f32,
    /// Largest sideways jitter a patrolling squid can roll, before scaling
    pub squid_jitter_max: u32,
    /// Multiplier from a jitter roll to pixels per step
    pub squid_jitter_scale: f32,
    /// Steps between jitter re-rolls
    pub squid_jitter_ticks: u32,
    /// Fraction of screen height at which squids switch to pursuit
    pub pursuit_threshold: f32,
    pub pursuit_speed: f32,
    /// Steps between pursuit target samples
    pub pursuit_retarget_ticks: u32,
    pub crab_shot_cooldown: u32,
    /// Per-step chance that a ready crab fires
    pub crab_fire_chance: f64,
    pub crab_bullet_speed: f32,
    pub crab_bullet_damage: u32,
    /// Horizontal distance within which an octopus burns the player
    pub tank_proximity: f32,
    pub tank_tick_interval: u32,
    pub tank_tick_damage: u32,
}

impl Default for BehaviorTuning {
    fn default() -> Self {
        Self {
            descent_step: 20.0,
            squid_sink_speed: 0.5,
            squid_jitter_max: 20,
            squid_jitter_scale: 0.1,
            squid_jitter_ticks: 15,
            pursuit_threshold: 0.5,
            pursuit_speed: 3.0,
            pursuit_retarget_ticks: 20,
            crab_shot_cooldown: 60,
            crab_fire_chance: 0.01,
            crab_bullet_speed: 5.0,
            crab_bullet_damage: 5,
            tank_proximity: 100.0,
            tank_tick_interval: 60,
            tank_tick_damage: 3,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub mothership: MothershipTuning,
    pub upgrades: UpgradeTuning,
    pub behavior: BehaviorTuning,
    pub squid: AlienStats,
    pub crab: AlienStats,
    pub octopus: AlienStats,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            mothership: MothershipTuning::default(),
            upgrades: UpgradeTuning::default(),
            behavior: BehaviorTuning::default(),
            squid: AlienStats {
                width: 20.0,
                height: 20.0,
                health: 1,
                speed: 2.0,
                contact_damage: 10,
                bounty: 50,
                cost: 50,
                spawn_cooldown: 30,
            },
            crab: AlienStats {
                width: 30.0,
                height: 30.0,
                health: 3,
                speed: 1.0,
                contact_damage: 5,
                bounty: 100,
                cost: 100,
                spawn_cooldown: 45,
            },
            octopus: AlienStats {
                width: 40.0,
                height: 40.0,
                health: 8,
                speed: 0.5,
                contact_damage: 3,
                bounty: 200,
                cost: 200,
                spawn_cooldown: 90,
            },
        }
    }
}

impl Tuning {
    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "must be positive" })
            }
        }

        fn fits_screen(field: &'static str, width: f32) -> Result<(), ConfigError> {
            if width <= SCREEN_WIDTH {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "wider than the screen" })
            }
        }

        positive("player.width", self.player.width)?;
        fits_screen("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.reload_speed", self.player.reload_speed)?;
        positive("player.bullet_speed", self.player.bullet_speed)?;
        positive("mothership.width", self.mothership.width)?;
        fits_screen("mothership.width", self.mothership.width)?;
        positive("mothership.height", self.mothership.height)?;
        positive("behavior.pursuit_speed", self.behavior.pursuit_speed)?;
        positive("behavior.crab_bullet_speed", self.behavior.crab_bullet_speed)?;

        for (field, stats) in [
            ("squid", &self.squid),
            ("crab", &self.crab),
            ("octopus", &self.octopus),
        ] {
            positive(field, stats.width)?;
            fits_screen(field, stats.width)?;
            positive(field, stats.height)?;
            if stats.health == 0 {
                return Err(ConfigError::Invalid { field, reason: "health must be nonzero" });
            }
        }

        if self.player.health == 0 || self.mothership.health == 0 {
            return Err(ConfigError::Invalid {
                field: "health",
                reason: "singleton health must be nonzero",
            });
        }
        let drift = self.mothership.drift_speed;
        if !(drift >= 0.0 && drift.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "mothership.drift_speed",
                reason: "must be zero or positive",
            });
        }
        if !self.behavior.squid_jitter_scale.is_finite() {
            return Err(ConfigError::Invalid {
                field: "behavior.squid_jitter_scale",
                reason: "must be finite",
            });
        }
        if !(0.0..=1.0).contains(&self.behavior.crab_fire_chance) {
            return Err(ConfigError::Invalid {
                field: "behavior.crab_fire_chance",
                reason: "must be within [0, 1]",
            });
        }
        if self.mothership.income_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "mothership.income_interval_ticks",
                reason: "must be nonzero",
            });
        }
        for (field, cost) in [
            ("upgrades.reload", &self.upgrades.reload),
            ("upgrades.max_health", &self.upgrades.max_health),
            ("upgrades.damage", &self.upgrades.damage),
        ] {
            if !(cost.rate > 0.0 && cost.rate.is_finite()) {
                return Err(ConfigError::Invalid { field, reason: "rate must be positive" });
            }
        }
        Ok(())
    }
}
