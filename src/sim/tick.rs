//! Fixed timestep simulation tick
//!
//! One call advances a round by exactly one frame. Order within a playing
//! step: player, mothership, commander, alien movement, contacts, alien
//! attacks, projectile travel and hits, then the game-over check.

use super::ai::{autopilot, commander_decision};
use super::combat::{alien_attacks, player_fire, resolve_contacts, resolve_projectiles};
use super::economy::{accrue_income, buy_upgrade, spawn_alien};
use super::movement::{advance_projectiles, drift_mothership, move_alien, move_player};
use super::state::{AlienKind, GameEvent, GamePhase, GameState, Side, UpgradeTrack};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move the defender left (held)
    pub left: bool,
    /// Move the defender right (held)
    pub right: bool,
    /// Fire (held; limited by reload)
    pub fire: bool,
    /// Flip autofire on/off (debounced)
    pub toggle_autofire: bool,
    /// Buy one level of an upgrade track
    pub upgrade: Option<UpgradeTrack>,
    /// Human commander: choose the alien kind for the next spawn
    pub select_alien: Option<AlienKind>,
    /// Human commander: spawn the selected kind centered at this x
    pub spawn_at: Option<f32>,
    /// Start / restart (title and game-over screens)
    pub confirm: bool,
    /// Help overlay key, held. Pauses while playing.
    pub pause_held: bool,
    /// Leave the game
    pub quit: bool,
    /// Idle/demo mode - AI plays the defender
    pub idle_mode: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.quit {
        if !state.quit_requested {
            log::info!("Quit requested");
        }
        state.quit_requested = true;
        return;
    }

    if !update_phase(state, input) {
        return;
    }

    // Idle/demo mode - autopilot supplies the defender's controls
    let input = if input.idle_mode {
        TickInput {
            select_alien: input.select_alien,
            spawn_at: input.spawn_at,
            idle_mode: true,
            ..autopilot(state)
        }
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    update_player(state, &input);
    update_mothership(state, &input);

    let player_center = state.player.center();
    for alien in state.aliens.iter_mut() {
        move_alien(alien, player_center, &state.tuning, &mut state.rng);
    }

    resolve_contacts(state);
    alien_attacks(state);
    advance_projectiles(&mut state.projectiles);
    resolve_projectiles(state);

    check_game_over(state);
}

/// Apply phase transitions; returns true when gameplay should run this step
fn update_phase(state: &mut GameState, input: &TickInput) -> bool {
    match state.phase {
        GamePhase::Start => {
            if input.confirm || input.idle_mode {
                log::info!("Round started (seed {})", state.seed);
                state.phase = GamePhase::Playing;
            } else if input.pause_held {
                state.phase = GamePhase::Help;
            }
            false
        }
        GamePhase::Help => {
            if !input.pause_held {
                state.phase = GamePhase::Start;
            }
            false
        }
        GamePhase::Playing => {
            if input.pause_held {
                state.phase = GamePhase::Paused;
                return false;
            }
            true
        }
        GamePhase::Paused => {
            if !input.pause_held {
                state.phase = GamePhase::Playing;
            }
            false
        }
        // Restart is the session's job: it needs a fresh state
        GamePhase::GameOver => false,
    }
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.reload_cooldown.tick();
    player.autofire_toggle.tick();

    if input.toggle_autofire && player.autofire_toggle.ready() {
        player.autofire = !player.autofire;
        player.autofire_toggle.trigger(AUTOFIRE_TOGGLE_TICKS);
        log::debug!("Autofire {}", if player.autofire { "on" } else { "off" });
    }

    move_player(player, input.left, input.right);

    if input.fire || player.autofire {
        player_fire(state);
    }

    if let Some(track) = input.upgrade {
        buy_upgrade(state, track);
    }
}

fn update_mothership(state: &mut GameState, input: &TickInput) {
    if let Some(amount) = accrue_income(&mut state.mothership, &state.tuning.mothership) {
        state.events.push(GameEvent::Income { amount });
    }
    if state.settings.commander_drift {
        drift_mothership(&mut state.mothership, &mut state.rng, &state.tuning.mothership);
    }
    state.mothership.spawn_cooldown.tick();

    if state.settings.commander_ai {
        if let Some((kind, x)) = commander_decision(state) {
            state.mothership.selected = kind;
            spawn_alien(state, kind, x);
        }
        return;
    }

    if let Some(kind) = input.select_alien {
        state.mothership.selected = kind;
    }
    if let Some(pointer_x) = input.spawn_at {
        let kind = state.mothership.selected;
        let x = pointer_x - kind.stats(&state.tuning).width / 2.0;
        spawn_alien(state, kind, x);
    }
}

/// Player death is checked first, so a double knockout goes to the mothership
fn check_game_over(state: &mut GameState) {
    let winner = if state.player.health == 0 {
        Side::Mothership
    } else if state.mothership.health == 0 {
        Side::Defender
    } else {
        return;
    };

    state.phase = GamePhase::GameOver;
    state.winner = Some(winner);
    state.events.push(GameEvent::GameOver { winner });
    log::info!(
        "Game over after {} ticks: {} wins ({} aliens destroyed)",
        state.time_ticks,
        winner.as_str(),
        state.aliens_destroyed
    );
}
