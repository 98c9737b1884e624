//! Money flow on both sides
//!
//! - Defender: earns bounties, spends on exponentially priced upgrades
//! - Mothership: earns a slowly accelerating trickle, spends on aliens
//!
//! Not having enough money is never an error, just a no-op.

use glam::Vec2;

use super::state::{AlienKind, GameEvent, GameState, Mothership, Player, UpgradeTrack};
use crate::consts::*;
use crate::tuning::{MothershipTuning, Tuning, UpgradeCost};

fn cost_curve(tuning: &Tuning, track: UpgradeTrack) -> &UpgradeCost {
    match track {
        UpgradeTrack::Reload => &tuning.upgrades.reload,
        UpgradeTrack::MaxHealth => &tuning.upgrades.max_health,
        UpgradeTrack::Damage => &tuning.upgrades.damage,
    }
}

/// Price of the next purchase on `track`
pub fn upgrade_price(player: &Player, track: UpgradeTrack, tuning: &Tuning) -> u32 {
    cost_curve(tuning, track).price(player.upgrades.get(track))
}

/// Buy one level of `track` if affordable
///
/// Debits the price, applies the effect and bumps the track counter together.
/// Returns the price paid, or `None` (with nothing changed) when short on money.
pub fn purchase_upgrade(player: &mut Player, track: UpgradeTrack, tuning: &Tuning) -> Option<u32> {
    let price = upgrade_price(player, track, tuning);
    if player.money < price {
        return None;
    }

    player.money -= price;
    let u = &tuning.upgrades;
    match track {
        UpgradeTrack::Reload => {
            player.reload_speed += u.reload_step;
        }
        UpgradeTrack::MaxHealth => {
            let old_max = player.max_health;
            let new_max = old_max + u.max_health_step;
            // Keep the same fraction of health
            player.health = (u64::from(player.health) * u64::from(new_max) / u64::from(old_max)) as u32;
            player.max_health = new_max;
        }
        UpgradeTrack::Damage => {
            player.bullet_damage += u.damage_step;
        }
    }
    player.upgrades.bump(track);
    Some(price)
}

/// Purchase on behalf of the defender and record it
pub fn buy_upgrade(state: &mut GameState, track: UpgradeTrack) -> Option<u32> {
    let price = purchase_upgrade(&mut state.player, track, &state.tuning)?;
    log::info!(
        "Defender bought {} upgrade for ${} (level {})",
        track.as_str(),
        price,
        state.player.upgrades.get(track)
    );
    state.events.push(GameEvent::UpgradePurchased { track, price });
    Some(price)
}

/// Credit a kill bounty
pub fn award_bounty(player: &mut Player, bounty: u32) {
    player.money = player.money.saturating_add(bounty);
}

/// Payout size for the next income tick
///
/// `income_base * min(1 + growth * payouts, cap)`, computed in thousandths so
/// the trickle is exact.
pub fn income_amount(payouts_so_far: u32, t: &MothershipTuning) -> u32 {
    let multiplier = (1000 + u64::from(t.income_growth_permille) * u64::from(payouts_so_far))
        .min(u64::from(t.income_cap_permille).max(1000));
    (u64::from(t.income_base) * multiplier / 1000) as u32
}

/// Advance the income timer by one step; pays out when it runs out
pub fn accrue_income(mothership: &mut Mothership, t: &MothershipTuning) -> Option<u32> {
    if !mothership.income_timer.tick_periodic(t.income_interval_ticks) {
        return None;
    }
    let amount = income_amount(mothership.income_payouts, t);
    mothership.money = mothership.money.saturating_add(amount);
    mothership.income_payouts += 1;
    Some(amount)
}

/// Launch an alien of `kind` just below the mothership, left edge at `x`
///
/// Requires a ready spawn cooldown and enough money. Returns the new alien's id.
pub fn spawn_alien(state: &mut GameState, kind: AlienKind, x: f32) -> Option<u32> {
    let stats = *kind.stats(&state.tuning);
    let mothership = &mut state.mothership;

    if !mothership.spawn_cooldown.ready() || mothership.money < stats.cost {
        return None;
    }

    mothership.money -= stats.cost;
    mothership.spawn_cooldown.trigger(stats.spawn_cooldown);

    let x = x.clamp(0.0, (SCREEN_WIDTH - stats.width).max(0.0));
    let y = mothership.rect().bottom();
    let id = state.insert_alien(kind, Vec2::new(x, y));

    log::debug!("Mothership launched {} #{} at x={:.0}", kind.as_str(), id, x);
    state.events.push(GameEvent::AlienSpawned { id, kind });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn empty_state() -> GameState {
        let settings = Settings {
            opening_wave: false,
            ..Default::default()
        };
        GameState::new(42, Tuning::default(), settings)
    }

    #[test]
    fn test_price_curves_per_track() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, false);
        let expected: [(UpgradeTrack, u32, f64); 3] = [
            (UpgradeTrack::Reload, 100, 1.5),
            (UpgradeTrack::MaxHealth, 80, 1.4),
            (UpgradeTrack::Damage, 150, 1.6),
        ];

        for (track, base, rate) in expected {
            for n in 0..=5u32 {
                match track {
                    UpgradeTrack::Reload => player.upgrades.reload = n,
                    UpgradeTrack::MaxHealth => player.upgrades.max_health = n,
                    UpgradeTrack::Damage => player.upgrades.damage = n,
                }
                let want = (base as f64 * rate.powi(n as i32)).round() as u32;
                assert_eq!(upgrade_price(&player, track, &tuning), want, "{track:?} n={n}");
            }
        }
    }

    #[test]
    fn test_tracks_are_independent() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, false);
        player.money = 10_000;
        purchase_upgrade(&mut player, UpgradeTrack::Reload, &tuning).unwrap();
        purchase_upgrade(&mut player, UpgradeTrack::Reload, &tuning).unwrap();
        assert_eq!(upgrade_price(&player, UpgradeTrack::Reload, &tuning), 225);
        assert_eq!(upgrade_price(&player, UpgradeTrack::Damage, &tuning), 150);
        assert_eq!(upgrade_price(&player, UpgradeTrack::MaxHealth, &tuning), 80);
    }

    #[test]
    fn test_purchase_insufficient_funds_is_noop() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, false);
        player.money = 99;
        let before = player.clone();

        assert_eq!(purchase_upgrade(&mut player, UpgradeTrack::Reload, &tuning), None);
        assert_eq!(player.money, before.money);
        assert_eq!(player.upgrades, before.upgrades);
        assert_eq!(player.reload_speed, before.reload_speed);
    }

    #[test]
    fn test_purchase_debits_exact_price() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, false);
        player.money = 300;

        assert_eq!(purchase_upgrade(&mut player, UpgradeTrack::Reload, &tuning), Some(100));
        assert_eq!(player.money, 200);
        assert_eq!(player.upgrades.reload, 1);
        assert_eq!(player.reload_speed, 1.5);
        assert_eq!(player.reload_ticks(), 40);
    }

    #[test]
    fn test_max_health_heals_proportionally() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, false);
        player.money = 80;
        player.health = 50;

        assert_eq!(purchase_upgrade(&mut player, UpgradeTrack::MaxHealth, &tuning), Some(80));
        assert_eq!(player.max_health, 125);
        // 50/100 of 125, floored
        assert_eq!(player.health, 62);
    }

    #[test]
    fn test_damage_upgrade() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, false);
        player.money = 150;
        purchase_upgrade(&mut player, UpgradeTrack::Damage, &tuning).unwrap();
        assert_eq!(player.bullet_damage, 2);
        assert_eq!(player.money, 0);
    }

    #[test]
    fn test_buy_upgrade_records_event() {
        let mut state = empty_state();
        state.player.money = 100;
        assert_eq!(buy_upgrade(&mut state, UpgradeTrack::Reload), Some(100));
        assert_eq!(
            state.events,
            vec![GameEvent::UpgradePurchased { track: UpgradeTrack::Reload, price: 100 }]
        );
        assert_eq!(buy_upgrade(&mut state, UpgradeTrack::Reload), None);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_income_grows_and_caps() {
        let t = MothershipTuning::default();
        assert_eq!(income_amount(0, &t), 25);
        assert_eq!(income_amount(10, &t), 30);
        assert_eq!(income_amount(50, &t), 50);
        // Multiplier capped at 3x
        assert_eq!(income_amount(100, &t), 75);
        assert_eq!(income_amount(10_000, &t), 75);
    }

    #[test]
    fn test_income_only_on_interval() {
        let t = MothershipTuning::default();
        let mut mothership = Mothership::new(&Tuning::default());
        let start = mothership.money;

        let mut payouts = Vec::new();
        for step in 1..=90u32 {
            if let Some(amount) = accrue_income(&mut mothership, &t) {
                payouts.push((step, amount));
            }
        }
        assert_eq!(payouts, vec![(30, 25), (60, 25), (90, 26)]);
        assert_eq!(mothership.money, start + 76);
        assert_eq!(mothership.income_payouts, 3);
    }

    #[test]
    fn test_spawn_squid_with_exact_money() {
        let mut state = empty_state();
        state.mothership.money = 50;

        let id = spawn_alien(&mut state, AlienKind::Squid, 100.0).expect("spawn should succeed");
        assert_eq!(state.mothership.money, 0);
        assert_eq!(state.aliens.len(), 1);
        let squid = state.alien(id).unwrap();
        assert_eq!(squid.pos.x, 100.0);
        assert_eq!(squid.pos.y, state.mothership.rect().bottom());
        assert_eq!(state.events, vec![GameEvent::AlienSpawned { id, kind: AlienKind::Squid }]);
    }

    #[test]
    fn test_spawn_squid_one_short() {
        let mut state = empty_state();
        state.mothership.money = 49;

        assert_eq!(spawn_alien(&mut state, AlienKind::Squid, 100.0), None);
        assert_eq!(state.mothership.money, 49);
        assert!(state.aliens.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_spawn_respects_cooldown() {
        let mut state = empty_state();
        state.mothership.money = 1000;

        assert!(spawn_alien(&mut state, AlienKind::Crab, 300.0).is_some());
        assert_eq!(state.mothership.spawn_cooldown.remaining(), 45);
        assert_eq!(spawn_alien(&mut state, AlienKind::Squid, 300.0), None);
        assert_eq!(state.mothership.money, 900);
    }

    #[test]
    fn test_spawn_clamps_x() {
        let mut state = empty_state();
        state.mothership.money = 200;
        let id = spawn_alien(&mut state, AlienKind::Octopus, 10_000.0).unwrap();
        assert_eq!(state.alien(id).unwrap().pos.x, SCREEN_WIDTH - 40.0);
    }
}
