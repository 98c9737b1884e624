//! Built-in decision makers
//!
//! - Commander AI: picks what the mothership buys, weighted by how hurt the
//!   defender is
//! - Autopilot: plays the defender in idle/demo mode

use rand::Rng;

use super::economy::upgrade_price;
use super::state::{AlienKind, GameState, UpgradeTrack};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn weights as cumulative thresholds, tried in order
type SpawnTable = [(AlienKind, f64); 3];

/// Defender above 70% health: favor damage dealers
const HEALTHY_TABLE: SpawnTable = [
    (AlienKind::Squid, 0.5),
    (AlienKind::Crab, 0.8),
    (AlienKind::Octopus, 1.0),
];
/// Defender above 30% health: mixed
const WOUNDED_TABLE: SpawnTable = [
    (AlienKind::Squid, 0.3),
    (AlienKind::Crab, 0.7),
    (AlienKind::Octopus, 1.0),
];
/// Defender nearly dead: spam cheap units
const CRITICAL_TABLE: SpawnTable = [
    (AlienKind::Squid, 0.6),
    (AlienKind::Crab, 0.9),
    (AlienKind::Octopus, 1.0),
];

fn spawn_table(health: u32, max_health: u32) -> &'static SpawnTable {
    let ratio = health as f32 / max_health.max(1) as f32;
    if ratio > 0.7 {
        &HEALTHY_TABLE
    } else if ratio > 0.3 {
        &WOUNDED_TABLE
    } else {
        &CRITICAL_TABLE
    }
}

/// Pick the first affordable kind whose threshold the roll falls under
pub fn choose_kind(choice: f64, money: u32, table: &SpawnTable, tuning: &Tuning) -> Option<AlienKind> {
    table
        .iter()
        .find(|(kind, threshold)| choice < *threshold && money >= kind.stats(tuning).cost)
        .map(|(kind, _)| *kind)
}

/// Decide what (if anything) the mothership launches this step, and where
pub fn commander_decision(state: &mut GameState) -> Option<(AlienKind, f32)> {
    if !state.mothership.spawn_cooldown.ready() || state.aliens.len() >= MAX_ALIENS {
        return None;
    }

    let choice: f64 = state.rng.random();
    let table = spawn_table(state.player.health, state.player.max_health);
    let kind = choose_kind(choice, state.mothership.money, table, &state.tuning)?;
    let x = state.rng.random_range(50.0..=SCREEN_WIDTH - 100.0);
    Some((kind, x))
}

/// Inputs the autopilot would press this step
///
/// Steers under the lowest alien (or the mothership when the field is
/// clear), keeps autofire on and buys the cheapest affordable upgrade.
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let target_x = state
        .aliens
        .iter()
        .max_by(|a, b| a.rect().bottom().total_cmp(&b.rect().bottom()))
        .map(|a| a.center().x)
        .unwrap_or_else(|| state.mothership.rect().center().x);

    let dx = target_x - player.center().x;
    let upgrade = UpgradeTrack::ALL
        .iter()
        .map(|&track| (track, upgrade_price(player, track, &state.tuning)))
        .filter(|&(_, price)| price <= player.money)
        .min_by_key(|&(_, price)| price)
        .map(|(track, _)| track);

    TickInput {
        left: dx < -player.move_speed,
        right: dx > player.move_speed,
        toggle_autofire: !player.autofire,
        upgrade,
        ..Default::default()
    }
}
