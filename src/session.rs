//! Multi-round session
//!
//! Owns the current round plus the history of finished ones. Restarting from
//! the game-over screen builds a fresh `GameState` with the same settings and
//! tuning and the next seed.

use crate::scoreboard::{RoundHistory, RoundRecord};
use crate::settings::GameConfig;
use crate::sim::{GamePhase, GameState, TickInput, tick};

#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub history: RoundHistory,
    config: GameConfig,
    /// Seed of the current round
    round_seed: u64,
    /// Set once the current round has been written to `history`
    recorded: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.settings.seed;
        Self {
            state: Self::fresh_round(&config, seed),
            history: RoundHistory::new(),
            config,
            round_seed: seed,
            recorded: false,
        }
    }

    fn fresh_round(config: &GameConfig, seed: u64) -> GameState {
        GameState::new(seed, config.tuning.clone(), config.settings.clone())
    }

    /// Advance by one step, handling restarts from the game-over screen
    pub fn step(&mut self, input: &TickInput) {
        if self.state.phase == GamePhase::GameOver
            && (input.confirm || input.idle_mode)
            && !input.quit
        {
            self.restart();
            // The new round starts straight into play
            self.state.phase = GamePhase::Playing;
            return;
        }

        tick(&mut self.state, input);

        if self.state.phase == GamePhase::GameOver && !self.recorded {
            self.history.record(RoundRecord::from_state(&self.state));
            self.recorded = true;
        }
    }

    /// Throw away the current round and begin the next seed
    pub fn restart(&mut self) {
        self.round_seed = self.round_seed.wrapping_add(1);
        log::info!("Restarting with seed {}", self.round_seed);
        self.state = Self::fresh_round(&self.config, self.round_seed);
        self.recorded = false;
    }

    /// Record the current round even though nobody won (e.g. demo time limit)
    pub fn abandon_round(&mut self) {
        if !self.recorded {
            self.history.record(RoundRecord::from_state(&self.state));
            self.recorded = true;
        }
    }

    pub fn round_seed(&self) -> u64 {
        self.round_seed
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested
    }
}
