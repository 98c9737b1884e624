//! Per-entity position updates
//!
//! One function per movement model; `move_alien` dispatches on the alien's
//! behaviour tag.

use glam::Vec2;
use rand::Rng;

use super::cooldown::Cooldown;
use super::state::{Alien, AlienBehavior, Mothership, MovementMode, Player, Projectile};
use crate::consts::*;
use crate::tuning::{MothershipTuning, Tuning};

/// Classic sweep: slide sideways, bounce off an edge and step down
pub fn patrol(alien: &mut Alien, descent_step: f32) {
    alien.pos.x += alien.speed * alien.direction;

    let max_x = SCREEN_WIDTH - alien.size.x;
    if alien.pos.x <= 0.0 {
        alien.pos.x = 0.0;
        alien.direction = 1.0;
        alien.pos.y += descent_step;
    } else if alien.pos.x >= max_x {
        alien.pos.x = max_x;
        alien.direction = -1.0;
        alien.pos.y += descent_step;
    }
}

/// Seek toward `target` (a center point) at `speed`
///
/// Distance is clamped to 1 so a unit sitting on its target doesn't divide
/// by zero.
pub fn pursue(alien: &mut Alien, target: Vec2, speed: f32) {
    let delta = target - alien.center();
    let dist = delta.length().max(1.0);
    alien.pos += delta / dist * speed;
}

/// Advance one alien by one step
pub fn move_alien(alien: &mut Alien, player_center: Vec2, tuning: &Tuning, rng: &mut impl Rng) {
    let b = &tuning.behavior;

    match alien.movement_mode() {
        MovementMode::Patrol => {
            if let AlienBehavior::Squid { jitter, jitter_timer, .. } = &mut alien.behavior {
                if jitter_timer.tick_periodic(b.squid_jitter_ticks) {
                    let max = i64::from(b.squid_jitter_max);
                    *jitter = rng.random_range(-max..=max) as f32 * b.squid_jitter_scale;
                }
                alien.pos.x += *jitter;
            }

            patrol(alien, b.descent_step);

            if let AlienBehavior::Squid { mode, retarget, .. } = &mut alien.behavior {
                alien.pos.y += b.squid_sink_speed;
                if alien.pos.y >= b.pursuit_threshold * SCREEN_HEIGHT {
                    log::trace!("squid {} switched to pursuit", alien.id);
                    *mode = MovementMode::Pursuit;
                    *retarget = Cooldown::READY;
                }
            }
        }
        MovementMode::Pursuit => {
            let target = match &mut alien.behavior {
                AlienBehavior::Squid {
                    retarget, target, ..
                } => {
                    if retarget.ready() {
                        *target = player_center;
                        retarget.trigger(b.pursuit_retarget_ticks);
                    }
                    retarget.tick();
                    *target
                }
                _ => player_center,
            };
            pursue(alien, target, b.pursuit_speed);
        }
    }
}

/// Input-driven horizontal movement, clamped to keep the ship on screen
pub fn move_player(player: &mut Player, left: bool, right: bool) {
    if left {
        player.pos.x -= player.move_speed;
    }
    if right {
        player.pos.x += player.move_speed;
    }
    player.pos.x = player.pos.x.clamp(0.0, (SCREEN_WIDTH - player.size.x).max(0.0));
}

/// Creep toward a periodically re-rolled horizontal target
pub fn drift_mothership(mothership: &mut Mothership, rng: &mut impl Rng, t: &MothershipTuning) {
    let max_x = (SCREEN_WIDTH - mothership.size.x).max(0.0);

    if mothership.drift_timer.ready() {
        mothership.drift_target = rng.random_range(0.0..=max_x);
        mothership.drift_timer.trigger(t.drift_retarget_ticks);
    }
    mothership.drift_timer.tick();

    let speed = t.drift_speed.max(0.0);
    let dx = mothership.drift_target - mothership.pos.x;
    mothership.pos.x = (mothership.pos.x + dx.clamp(-speed, speed)).clamp(0.0, max_x);
}

/// Straight-line vertical travel for every bullet in flight
pub fn advance_projectiles(projectiles: &mut [Projectile]) {
    for projectile in projectiles {
        projectile.advance();
    }
}
