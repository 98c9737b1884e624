//! Combat resolution
//!
//! Runs after movement each step:
//! 1. Contact pass (rams and octopus burn)
//! 2. Alien attacks (crab shots)
//! 3. Projectile pass (off-screen cull, then at most one hit per projectile)
//!
//! Removal is mark-then-compact: nothing is taken out of a collection while
//! it is being walked.

use rand::Rng;

use super::collision::{first_hit, overlaps};
use super::cooldown::Cooldown;
use super::economy::award_bounty;
use super::rect::Rect;
use super::state::{Alien, AlienBehavior, Faction, GameEvent, GameState, Projectile, RemovalCause};
use crate::consts::*;

/// Fire from the player's ship if the reload cooldown allows it
///
/// Manual fire and autofire share this cooldown. Returns the projectile id.
pub fn player_fire(state: &mut GameState) -> Option<u32> {
    if !state.player.reload_cooldown.ready() {
        return None;
    }

    let id = state.next_entity_id();
    let player = &mut state.player;
    let projectile = Projectile::new(
        id,
        player.center().x,
        player.pos.y,
        -player.bullet_speed,
        player.bullet_damage,
        Faction::Defender,
        None,
    );
    let reload = player.reload_ticks();
    player.reload_cooldown.trigger(reload);
    state.projectiles.push(projectile);
    Some(id)
}

/// Aliens touching the player's band: rams deal contact damage and die,
/// octopuses in reach burn the player periodically
pub fn resolve_contacts(state: &mut GameState) {
    let b = &state.tuning.behavior;
    let player = &mut state.player;
    let player_rect = player.rect();
    let mut removed: Vec<(u32, RemovalCause)> = Vec::new();

    for alien in state.aliens.iter_mut() {
        if alien.pos.y > SCREEN_HEIGHT {
            removed.push((alien.id, RemovalCause::Escaped));
            continue;
        }

        let in_band = alien.rect().bottom() >= player_rect.y;
        if in_band && overlaps(&alien.rect(), &player_rect) {
            player.take_damage(alien.contact_damage);
            state.events.push(GameEvent::PlayerDamaged { amount: alien.contact_damage });
            removed.push((alien.id, RemovalCause::Contact));
            continue;
        }

        if let AlienBehavior::Octopus { ticking, tick_timer } = &mut alien.behavior {
            let in_reach = in_band && (alien.pos.x - player_rect.x).abs() < b.tank_proximity;
            if in_reach {
                *ticking = true;
                if tick_timer.tick_periodic(b.tank_tick_interval) {
                    player.take_damage(b.tank_tick_damage);
                    state.events.push(GameEvent::PlayerDamaged { amount: b.tank_tick_damage });
                }
            } else if *ticking {
                *ticking = false;
                *tick_timer = Cooldown::new(b.tank_tick_interval);
            }
        }
    }

    if removed.is_empty() {
        return;
    }
    for &(id, cause) in &removed {
        if let Some(alien) = state.aliens.iter().find(|a| a.id == id) {
            log::debug!("{} #{} removed: {:?}", alien.kind.as_str(), id, cause);
            state.events.push(GameEvent::AlienRemoved { id, kind: alien.kind, cause });
        }
    }
    state.aliens.retain(|a| !removed.iter().any(|(id, _)| *id == a.id));
}

/// Crabs with a ready gun roll to fire straight down
pub fn alien_attacks(state: &mut GameState) {
    let b = &state.tuning.behavior;
    let rng = &mut state.rng;
    let mut shots: Vec<(f32, f32, u32)> = Vec::new();

    for alien in state.aliens.iter_mut() {
        if let AlienBehavior::Crab { shot_cooldown } = &mut alien.behavior {
            shot_cooldown.tick();
            if shot_cooldown.ready() && rng.random_bool(b.crab_fire_chance) {
                shot_cooldown.trigger(b.crab_shot_cooldown);
                let rect = Rect::from_pos_size(alien.pos, alien.size);
                shots.push((rect.center().x, rect.bottom(), alien.id));
            }
        }
    }

    let (speed, damage) = (b.crab_bullet_speed, b.crab_bullet_damage);
    for (x, y, source) in shots {
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, x, y, speed, damage, Faction::Invaders, Some(source)));
    }
}

/// Resolve every live projectile against its possible targets
///
/// Works on a snapshot of the projectile list; each projectile hits at most
/// one target. Dead aliens are skipped for the rest of the pass and
/// compacted at the end.
pub fn resolve_projectiles(state: &mut GameState) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for projectile in projectiles {
        let rect = projectile.rect();
        if rect.is_off_screen_vertical(SCREEN_HEIGHT) {
            continue;
        }

        let consumed = match projectile.faction {
            Faction::Defender => defender_hit(state, &projectile, &rect),
            Faction::Invaders => invader_hit(state, &projectile, &rect),
        };
        if !consumed {
            survivors.push(projectile);
        }
    }

    state.projectiles = survivors;
    state.aliens.retain(|a| !a.is_dead());
}

/// First live alien under `rect`, skipping `ignore`
fn struck_alien<'a>(aliens: &'a mut [Alien], rect: &Rect, ignore: Option<u32>) -> Option<&'a mut Alien> {
    let candidates = aliens
        .iter()
        .filter(|a| !a.is_dead() && Some(a.id) != ignore)
        .map(|a| (a.id, a.rect()));
    let id = first_hit(rect, candidates)?;
    aliens.iter_mut().find(|a| a.id == id)
}

fn defender_hit(state: &mut GameState, projectile: &Projectile, rect: &Rect) -> bool {
    // Mothership first
    if overlaps(rect, &state.mothership.rect()) {
        state.mothership.take_damage(projectile.damage);
        state.events.push(GameEvent::MothershipDamaged { amount: projectile.damage });
        return true;
    }

    let Some(alien) = struck_alien(&mut state.aliens, rect, None) else {
        return false;
    };

    if alien.take_damage(projectile.damage) {
        let (id, kind, bounty) = (alien.id, alien.kind, alien.bounty);
        award_bounty(&mut state.player, bounty);
        state.aliens_destroyed += 1;
        log::debug!("Defender shot down {} #{} (+${})", kind.as_str(), id, bounty);
        state.events.push(GameEvent::AlienRemoved {
            id,
            kind,
            cause: RemovalCause::Shot { bounty },
        });
    }
    true
}

fn invader_hit(state: &mut GameState, projectile: &Projectile, rect: &Rect) -> bool {
    // Player first
    if overlaps(rect, &state.player.rect()) {
        state.player.take_damage(projectile.damage);
        state.events.push(GameEvent::PlayerDamaged { amount: projectile.damage });
        return true;
    }

    if !state.settings.friendly_fire {
        return false;
    }

    let Some(alien) = struck_alien(&mut state.aliens, rect, projectile.source) else {
        return false;
    };

    if alien.take_damage(projectile.damage) {
        log::debug!("{} #{} killed by friendly fire", alien.kind.as_str(), alien.id);
        state.events.push(GameEvent::AlienRemoved {
            id: alien.id,
            kind: alien.kind,
            cause: RemovalCause::FriendlyFire,
        });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::AlienKind;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn empty_state() -> GameState {
        let settings = Settings {
            opening_wave: false,
            commander_drift: false,
            ..Default::default()
        };
        GameState::new(7, Tuning::default(), settings)
    }

    fn defender_shot(state: &mut GameState, center_x: f32, y: f32, damage: u32) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            center_x,
            y,
            -10.0,
            damage,
            Faction::Defender,
            None,
        ));
        id
    }

    fn invader_shot(state: &mut GameState, center_x: f32, y: f32, source: Option<u32>) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            center_x,
            y,
            5.0,
            5,
            Faction::Invaders,
            source,
        ));
        id
    }

    #[test]
    fn test_player_fire_spawns_centered_shot() {
        let mut state = empty_state();
        let id = player_fire(&mut state).expect("cooldown is ready");

        let shot = &state.projectiles[0];
        assert_eq!(shot.id, id);
        assert_eq!(shot.rect().center().x, state.player.center().x);
        assert_eq!(shot.pos.y, state.player.pos.y);
        assert_eq!(shot.velocity, -state.tuning.player.bullet_speed);
        assert_eq!(shot.faction, Faction::Defender);
        assert_eq!(state.player.reload_cooldown.remaining(), 60);

        // Still reloading
        assert_eq!(player_fire(&mut state), None);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_off_screen_projectiles_removed_untested() {
        let mut state = empty_state();
        // An alien sitting above the screen, overlapping the stray shot
        let alien_id = state.insert_alien(AlienKind::Crab, Vec2::new(100.0, -20.0));
        defender_shot(&mut state, 110.0, -5.0, 1);
        // And one past the bottom
        invader_shot(&mut state, 400.0, SCREEN_HEIGHT + 1.0, None);

        resolve_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.alien(alien_id).unwrap().health, 3);
        assert_eq!(state.player.health, 100);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_bounty_paid_on_lethal_hit_only() {
        let mut state = empty_state();
        let id = state.insert_alien(AlienKind::Crab, Vec2::new(200.0, 300.0));
        state.alien_mut(id).unwrap().health = 2;
        let money = state.player.money;

        defender_shot(&mut state, 215.0, 310.0, 1);
        resolve_projectiles(&mut state);
        assert_eq!(state.alien(id).unwrap().health, 1);
        assert_eq!(state.player.money, money);
        assert!(state.projectiles.is_empty());

        defender_shot(&mut state, 215.0, 310.0, 1);
        resolve_projectiles(&mut state);
        assert!(state.alien(id).is_none());
        assert_eq!(state.player.money, money + 100);
        assert_eq!(state.aliens_destroyed, 1);
        assert!(state.events.contains(&GameEvent::AlienRemoved {
            id,
            kind: AlienKind::Crab,
            cause: RemovalCause::Shot { bounty: 100 },
        }));
    }

    #[test]
    fn test_shot_hits_one_target_only() {
        let mut state = empty_state();
        let first = state.insert_alien(AlienKind::Octopus, Vec2::new(200.0, 300.0));
        let second = state.insert_alien(AlienKind::Octopus, Vec2::new(205.0, 305.0));

        defender_shot(&mut state, 220.0, 320.0, 1);
        resolve_projectiles(&mut state);
        assert_eq!(state.alien(first).unwrap().health, 7);
        assert_eq!(state.alien(second).unwrap().health, 8);
    }

    #[test]
    fn test_mothership_checked_before_aliens() {
        let mut state = empty_state();
        let under = state.mothership.rect();
        let id = state.insert_alien(AlienKind::Octopus, Vec2::new(under.x, under.y + 10.0));

        defender_shot(&mut state, under.center().x, under.y + 20.0, 4);
        resolve_projectiles(&mut state);
        assert_eq!(state.mothership.health, 496);
        assert_eq!(state.alien(id).unwrap().health, 8);
    }

    #[test]
    fn test_second_shot_skips_dead_alien() {
        let mut state = empty_state();
        let squid = state.insert_alien(AlienKind::Squid, Vec2::new(200.0, 300.0));
        let crab = state.insert_alien(AlienKind::Crab, Vec2::new(195.0, 295.0));

        defender_shot(&mut state, 210.0, 305.0, 1);
        defender_shot(&mut state, 210.0, 305.0, 1);
        resolve_projectiles(&mut state);

        assert!(state.alien(squid).is_none());
        assert_eq!(state.alien(crab).unwrap().health, 2);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_invader_shot_hits_player() {
        let mut state = empty_state();
        let center = state.player.center();
        invader_shot(&mut state, center.x, center.y, None);
        resolve_projectiles(&mut state);
        assert_eq!(state.player.health, 95);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_friendly_fire_skips_shooter() {
        let mut state = empty_state();
        let shooter = state.insert_alien(AlienKind::Crab, Vec2::new(300.0, 200.0));
        invader_shot(&mut state, 315.0, 210.0, Some(shooter));

        resolve_projectiles(&mut state);
        assert_eq!(state.alien(shooter).unwrap().health, 3);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_friendly_fire_kills_without_bounty() {
        let mut state = empty_state();
        let shooter = state.insert_alien(AlienKind::Crab, Vec2::new(300.0, 100.0));
        let victim = state.insert_alien(AlienKind::Squid, Vec2::new(305.0, 200.0));
        let money = state.player.money;

        invader_shot(&mut state, 315.0, 205.0, Some(shooter));
        resolve_projectiles(&mut state);

        assert!(state.alien(victim).is_none());
        assert_eq!(state.player.money, money);
        assert_eq!(state.aliens_destroyed, 0);
        assert!(state.events.contains(&GameEvent::AlienRemoved {
            id: victim,
            kind: AlienKind::Squid,
            cause: RemovalCause::FriendlyFire,
        }));
    }

    #[test]
    fn test_friendly_fire_disabled() {
        let mut state = empty_state();
        state.settings.friendly_fire = false;
        let victim = state.insert_alien(AlienKind::Squid, Vec2::new(305.0, 200.0));
        invader_shot(&mut state, 315.0, 205.0, None);

        resolve_projectiles(&mut state);
        assert_eq!(state.alien(victim).unwrap().health, 1);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_contact_damages_player_and_removes_alien() {
        let mut state = empty_state();
        let player = state.player.rect();
        let id = state.insert_alien(AlienKind::Squid, Vec2::new(player.x + 5.0, player.y - 10.0));

        resolve_contacts(&mut state);
        assert!(state.alien(id).is_none());
        assert_eq!(state.player.health, 90);
        assert_eq!(state.player.money, 100);
        assert!(state.events.contains(&GameEvent::AlienRemoved {
            id,
            kind: AlienKind::Squid,
            cause: RemovalCause::Contact,
        }));
    }

    #[test]
    fn test_alien_above_band_is_left_alone() {
        let mut state = empty_state();
        let id = state.insert_alien(AlienKind::Crab, Vec2::new(380.0, 300.0));
        resolve_contacts(&mut state);
        assert!(state.alien(id).is_some());
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_escaped_alien_removed() {
        let mut state = empty_state();
        let id = state.insert_alien(AlienKind::Crab, Vec2::new(10.0, SCREEN_HEIGHT + 1.0));
        resolve_contacts(&mut state);
        assert!(state.alien(id).is_none());
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_octopus_burns_player_while_close() {
        let mut state = empty_state();
        let player = state.player.rect();
        // In the player's band, 60px to the left: no overlap, within reach
        let id = state.insert_alien(AlienKind::Octopus, Vec2::new(player.x - 60.0, player.y - 20.0));

        for _ in 0..59 {
            resolve_contacts(&mut state);
        }
        assert_eq!(state.player.health, 100);
        resolve_contacts(&mut state);
        assert_eq!(state.player.health, 97);
        assert!(matches!(
            state.alien(id).unwrap().behavior,
            AlienBehavior::Octopus { ticking: true, .. }
        ));

        // Moving out of reach disengages and restarts the timer
        state.alien_mut(id).unwrap().pos.x = 0.0;
        state.player.pos.x = 600.0;
        resolve_contacts(&mut state);
        assert!(matches!(
            state.alien(id).unwrap().behavior,
            AlienBehavior::Octopus { ticking: false, .. }
        ));
        assert_eq!(state.player.health, 97);
    }

    #[test]
    fn test_crab_fires_down_from_its_center() {
        let mut state = empty_state();
        state.tuning.behavior.crab_fire_chance = 1.0;
        let id = state.insert_alien(AlienKind::Crab, Vec2::new(100.0, 100.0));

        alien_attacks(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert_eq!(shot.source, Some(id));
        assert_eq!(shot.faction, Faction::Invaders);
        assert_eq!(shot.rect().center().x, 115.0);
        assert_eq!(shot.pos.y, 130.0);
        assert!(shot.velocity > 0.0);

        // Cooldown gates the next shot
        alien_attacks(&mut state);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_crab_never_fires_at_zero_chance() {
        let mut state = empty_state();
        state.tuning.behavior.crab_fire_chance = 0.0;
        state.insert_alien(AlienKind::Crab, Vec2::new(100.0, 100.0));
        for _ in 0..500 {
            alien_attacks(&mut state);
        }
        assert!(state.projectiles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_alien_health_never_increases(hits in proptest::collection::vec(0u32..20, 0..30)) {
            let tuning = Tuning::default();
            let mut alien = Alien::new(1, AlienKind::Octopus, Vec2::ZERO, &tuning);
            let mut last = alien.health;
            for hit in hits {
                let lethal = alien.take_damage(hit);
                prop_assert!(alien.health <= last);
                prop_assert_eq!(lethal, alien.health == 0);
                last = alien.health;
            }
        }
    }
}
