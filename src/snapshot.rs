//! Read-only view of a round for renderers and tooling
//!
//! A `Snapshot` owns copies of everything a frame needs to draw, so the
//! presentation layer never touches `GameState` directly.

use serde::Serialize;

use crate::sim::economy::upgrade_price;
use crate::sim::{AlienKind, Faction, GamePhase, GameState, Rect, Side, UpgradeTrack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityType {
    Player,
    Mothership,
    Squid,
    Crab,
    Octopus,
    DefenderShot,
    InvaderShot,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub entity_type: EntityType,
    pub rect: Rect,
    /// `(health, max_health)` for things that can be damaged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpgradeOffer {
    pub track: UpgradeTrack,
    pub level: u32,
    pub price: u32,
    pub affordable: bool,
}

/// Numbers shown in the heads-up display
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub player_money: u32,
    pub player_health: u32,
    pub player_max_health: u32,
    pub autofire: bool,
    pub reload_remaining: u32,
    pub upgrades: Vec<UpgradeOffer>,
    pub mothership_money: u32,
    pub mothership_health: u32,
    pub mothership_max_health: u32,
    pub selected_alien: &'static str,
    pub spawn_cooldown: u32,
    pub alien_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    pub entities: Vec<EntitySnapshot>,
    pub hud: Hud,
}

/// Singletons get ids outside the entity id space
const PLAYER_ID: u32 = 0;
const MOTHERSHIP_ID: u32 = u32::MAX;

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let mothership = &state.mothership;

        let mut entities = Vec::with_capacity(2 + state.aliens.len() + state.projectiles.len());
        entities.push(EntitySnapshot {
            id: PLAYER_ID,
            entity_type: EntityType::Player,
            rect: player.rect(),
            health: Some((player.health, player.max_health)),
        });
        entities.push(EntitySnapshot {
            id: MOTHERSHIP_ID,
            entity_type: EntityType::Mothership,
            rect: mothership.rect(),
            health: Some((mothership.health, mothership.max_health)),
        });
        entities.extend(state.aliens.iter().map(|alien| EntitySnapshot {
            id: alien.id,
            entity_type: match alien.kind {
                AlienKind::Squid => EntityType::Squid,
                AlienKind::Crab => EntityType::Crab,
                AlienKind::Octopus => EntityType::Octopus,
            },
            rect: alien.rect(),
            health: Some((alien.health, alien.max_health)),
        }));
        entities.extend(state.projectiles.iter().map(|shot| EntitySnapshot {
            id: shot.id,
            entity_type: match shot.faction {
                Faction::Defender => EntityType::DefenderShot,
                Faction::Invaders => EntityType::InvaderShot,
            },
            rect: shot.rect(),
            health: None,
        }));

        let upgrades = UpgradeTrack::ALL
            .iter()
            .map(|&track| {
                let price = upgrade_price(player, track, &state.tuning);
                UpgradeOffer {
                    track,
                    level: player.upgrades.get(track),
                    price,
                    affordable: player.money >= price,
                }
            })
            .collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            winner: state.winner,
            entities,
            hud: Hud {
                player_money: player.money,
                player_health: player.health,
                player_max_health: player.max_health,
                autofire: player.autofire,
                reload_remaining: player.reload_cooldown.remaining(),
                upgrades,
                mothership_money: mothership.money,
                mothership_health: mothership.health,
                mothership_max_health: mothership.max_health,
                selected_alien: mothership.selected.as_str(),
                spawn_cooldown: mothership.spawn_cooldown.remaining(),
                alien_count: state.aliens.len(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
