//! Game state and core simulation types
//!
//! Entities are plain data. Per-kind behaviour is selected by matching on
//! `AlienBehavior`, never by trait objects.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cooldown::Cooldown;
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::{AlienStats, Tuning};

/// Current screen / phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Help overlay opened from the title screen
    Help,
    /// Active gameplay
    Playing,
    /// Gameplay frozen while the help overlay is held open
    Paused,
    /// Round ended, waiting for confirm to restart
    GameOver,
}

/// The two sides of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Defender,
    Mothership,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Defender => "Defender",
            Side::Mothership => "Mothership",
        }
    }
}

/// Who owns a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Defender,
    Invaders,
}

/// Alien variants the mothership can buy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlienKind {
    /// Fast and fragile; dives at the player once low enough
    Squid,
    /// Shooter
    Crab,
    /// Slow tank that burns the player when close
    Octopus,
}

impl AlienKind {
    pub const ALL: [AlienKind; 3] = [AlienKind::Squid, AlienKind::Crab, AlienKind::Octopus];

    pub fn stats<'a>(&self, tuning: &'a Tuning) -> &'a AlienStats {
        match self {
            AlienKind::Squid => &tuning.squid,
            AlienKind::Crab => &tuning.crab,
            AlienKind::Octopus => &tuning.octopus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlienKind::Squid => "squid",
            AlienKind::Crab => "crab",
            AlienKind::Octopus => "octopus",
        }
    }
}

/// Squid movement mode. The switch to `Pursuit` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    Patrol,
    Pursuit,
}

/// Kind-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum AlienBehavior {
    Squid {
        mode: MovementMode,
        /// Steps until the pursuit target is sampled again
        retarget: Cooldown,
        target: Vec2,
        /// Sideways wobble added each patrol step (pixels)
        jitter: f32,
        jitter_timer: Cooldown,
    },
    Crab {
        shot_cooldown: Cooldown,
    },
    Octopus {
        /// Tick damage is engaged while the player is within reach
        ticking: bool,
        tick_timer: Cooldown,
    },
}

/// A hostile unit
#[derive(Debug, Clone)]
pub struct Alien {
    pub id: u32,
    pub kind: AlienKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub contact_damage: u32,
    pub bounty: u32,
    /// Patrol direction: 1.0 = right, -1.0 = left
    pub direction: f32,
    pub behavior: AlienBehavior,
}

impl Alien {
    pub fn new(id: u32, kind: AlienKind, pos: Vec2, tuning: &Tuning) -> Self {
        let stats = kind.stats(tuning);
        let behavior = match kind {
            AlienKind::Squid => AlienBehavior::Squid {
                mode: MovementMode::Patrol,
                retarget: Cooldown::READY,
                target: pos,
                jitter: 0.0,
                jitter_timer: Cooldown::new(tuning.behavior.squid_jitter_ticks),
            },
            AlienKind::Crab => AlienBehavior::Crab {
                shot_cooldown: Cooldown::READY,
            },
            AlienKind::Octopus => AlienBehavior::Octopus {
                ticking: false,
                tick_timer: Cooldown::new(tuning.behavior.tank_tick_interval),
            },
        };

        Self {
            id,
            kind,
            pos,
            size: Vec2::new(stats.width, stats.height),
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            contact_damage: stats.contact_damage,
            bounty: stats.bounty,
            direction: 1.0,
            behavior,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Apply damage, clamping at zero. Returns true if this hit was lethal.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Current movement mode (aliens other than squids always patrol)
    pub fn movement_mode(&self) -> MovementMode {
        match self.behavior {
            AlienBehavior::Squid { mode, .. } => mode,
            _ => MovementMode::Patrol,
        }
    }
}

/// A bullet
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity per step (negative = up)
    pub velocity: f32,
    pub damage: u32,
    pub faction: Faction,
    /// Alien that fired it, if any. Only used to skip self-hits.
    pub source: Option<u32>,
}

impl Projectile {
    /// Create a projectile whose horizontal center sits at `center_x`
    pub fn new(
        id: u32,
        center_x: f32,
        y: f32,
        velocity: f32,
        damage: u32,
        faction: Faction,
        source: Option<u32>,
    ) -> Self {
        Self {
            id,
            pos: Vec2::new(center_x - PROJECTILE_WIDTH / 2.0, y),
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            velocity,
            damage,
            faction,
            source,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.velocity;
    }
}

/// Upgrade shop tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeTrack {
    Reload,
    MaxHealth,
    Damage,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 3] = [
        UpgradeTrack::Reload,
        UpgradeTrack::MaxHealth,
        UpgradeTrack::Damage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeTrack::Reload => "reload",
            UpgradeTrack::MaxHealth => "max health",
            UpgradeTrack::Damage => "damage",
        }
    }
}

/// Successful purchases per track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCounts {
    pub reload: u32,
    pub max_health: u32,
    pub damage: u32,
}

impl UpgradeCounts {
    pub fn get(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Reload => self.reload,
            UpgradeTrack::MaxHealth => self.max_health,
            UpgradeTrack::Damage => self.damage,
        }
    }

    pub fn bump(&mut self, track: UpgradeTrack) {
        match track {
            UpgradeTrack::Reload => self.reload += 1,
            UpgradeTrack::MaxHealth => self.max_health += 1,
            UpgradeTrack::Damage => self.damage += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.reload + self.max_health + self.damage
    }
}

/// The defender's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub move_speed: f32,
    /// Shots per second
    pub reload_speed: f32,
    pub reload_cooldown: Cooldown,
    pub bullet_speed: f32,
    pub bullet_damage: u32,
    pub money: u32,
    pub upgrades: UpgradeCounts,
    pub autofire: bool,
    pub autofire_toggle: Cooldown,
}

impl Player {
    pub fn new(tuning: &Tuning, autofire: bool) -> Self {
        let t = &tuning.player;
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0 - t.width / 2.0, SCREEN_HEIGHT - t.bottom_margin),
            size: Vec2::new(t.width, t.height),
            health: t.health,
            max_health: t.health,
            move_speed: t.move_speed,
            reload_speed: t.reload_speed,
            reload_cooldown: Cooldown::READY,
            bullet_speed: t.bullet_speed,
            bullet_damage: t.bullet_damage,
            money: t.starting_money,
            upgrades: UpgradeCounts::default(),
            autofire,
            autofire_toggle: Cooldown::READY,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Steps between shots: `floor(SIM_HZ / reload_speed)`, at least one
    pub fn reload_ticks(&self) -> u32 {
        ((SIM_HZ as f32 / self.reload_speed).floor() as u32).max(1)
    }

    /// Apply damage, clamping at zero. Returns true if the ship is destroyed.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }
}

/// The opposing commander
#[derive(Debug, Clone)]
pub struct Mothership {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub money: u32,
    pub income_timer: Cooldown,
    /// Income payouts made so far (drives the growth multiplier)
    pub income_payouts: u32,
    /// Kind launched on the next spawn click
    pub selected: AlienKind,
    pub spawn_cooldown: Cooldown,
    /// Horizontal drift destination (left edge)
    pub drift_target: f32,
    pub drift_timer: Cooldown,
}

impl Mothership {
    pub fn new(tuning: &Tuning) -> Self {
        let t = &tuning.mothership;
        let x = SCREEN_WIDTH / 2.0 - t.width / 2.0;
        Self {
            pos: Vec2::new(x, t.top_margin),
            size: Vec2::new(t.width, t.height),
            health: t.health,
            max_health: t.health,
            money: t.starting_money,
            income_timer: Cooldown::new(t.income_interval_ticks),
            income_payouts: 0,
            selected: AlienKind::Squid,
            spawn_cooldown: Cooldown::READY,
            drift_target: x,
            drift_timer: Cooldown::READY,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }
}

/// How an alien left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Shot down by the defender; bounty was paid
    Shot { bounty: u32 },
    /// Killed by another alien's bullet
    FriendlyFire,
    /// Rammed the player
    Contact,
    /// Fell off the bottom of the screen
    Escaped,
}

/// Things that happened during the last step, for logging and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AlienSpawned { id: u32, kind: AlienKind },
    AlienRemoved { id: u32, kind: AlienKind, cause: RemovalCause },
    PlayerDamaged { amount: u32 },
    MothershipDamaged { amount: u32 },
    UpgradePurchased { track: UpgradeTrack, price: u32 },
    Income { amount: u32 },
    GameOver { winner: Side },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub winner: Option<Side>,
    pub player: Player,
    pub mothership: Mothership,
    /// Live aliens (spawn order)
    pub aliens: Vec<Alien>,
    /// Live projectiles (fire order)
    pub projectiles: Vec<Projectile>,
    /// Steps simulated while playing
    pub time_ticks: u64,
    /// Aliens shot down by the defender this round
    pub aliens_destroyed: u32,
    /// Events produced by the last step (cleared at the start of each step)
    pub events: Vec<GameEvent>,
    /// Set once a quit input arrives; the loop owner exits
    pub quit_requested: bool,
    pub tuning: Tuning,
    pub settings: Settings,
    next_id: u32,
}

impl GameState {
    /// Create a round on the title screen
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            winner: None,
            player: Player::new(&tuning, settings.autofire_on_start),
            mothership: Mothership::new(&tuning),
            aliens: Vec::new(),
            projectiles: Vec::new(),
            time_ticks: 0,
            aliens_destroyed: 0,
            events: Vec::new(),
            quit_requested: false,
            tuning,
            settings,
            next_id: 1,
        };

        if state.settings.opening_wave {
            state.spawn_opening_wave();
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an alien directly, bypassing the mothership's wallet
    pub fn insert_alien(&mut self, kind: AlienKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let alien = Alien::new(id, kind, pos, &self.tuning);
        self.aliens.push(alien);
        id
    }

    /// Preset formation: a row of squids, a row of crabs and one octopus
    pub fn spawn_opening_wave(&mut self) {
        for i in 0..5 {
            self.insert_alien(AlienKind::Squid, Vec2::new(50.0 + i as f32 * 100.0, 100.0));
        }
        for i in 0..3 {
            self.insert_alien(AlienKind::Crab, Vec2::new(100.0 + i as f32 * 150.0, 150.0));
        }
        let octopus_x = SCREEN_WIDTH / 2.0 - self.tuning.octopus.width / 2.0;
        self.insert_alien(AlienKind::Octopus, Vec2::new(octopus_x, 200.0));
    }

    pub fn alien(&self, id: u32) -> Option<&Alien> {
        self.aliens.iter().find(|a| a.id == id)
    }

    pub fn alien_mut(&mut self, id: u32) -> Option<&mut Alien> {
        self.aliens.iter_mut().find(|a| a.id == id)
    }
}
