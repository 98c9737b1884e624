//! Round history
//!
//! Kept in memory for the lifetime of the process; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Side};

/// Maximum number of finished rounds to keep
pub const MAX_RECORDED_ROUNDS: usize = 100;

/// Outcome of one finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round seed, for replaying it
    pub seed: u64,
    /// `None` if the round was abandoned before anyone won
    pub winner: Option<Side>,
    /// Steps simulated while playing
    pub ticks: u64,
    pub aliens_destroyed: u32,
    /// Upgrades bought by the defender across all tracks
    pub upgrades: u32,
}

impl RoundRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            seed: state.seed,
            winner: state.winner,
            ticks: state.time_ticks,
            aliens_destroyed: state.aliens_destroyed,
            upgrades: state.player.upgrades.total(),
        }
    }
}

/// Oldest-first list of finished rounds
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoundHistory {
    pub rounds: Vec<RoundRecord>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    /// Append a finished round, dropping the oldest once full
    pub fn record(&mut self, record: RoundRecord) {
        log::info!(
            "Round {} recorded: winner={}, ticks={}, kills={}, upgrades={}",
            self.rounds.len() + 1,
            record.winner.map_or("none", |w| w.as_str()),
            record.ticks,
            record.aliens_destroyed,
            record.upgrades
        );
        self.rounds.push(record);
        if self.rounds.len() > MAX_RECORDED_ROUNDS {
            self.rounds.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Rounds won by `side`
    pub fn wins(&self, side: Side) -> usize {
        self.rounds.iter().filter(|r| r.winner == Some(side)).count()
    }

    /// Quickest round the defender won
    pub fn fastest_defender_win(&self) -> Option<&RoundRecord> {
        self.rounds
            .iter()
            .filter(|r| r.winner == Some(Side::Defender))
            .min_by_key(|r| r.ticks)
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }
}
