//! Defender vs Mothership headless runner
//!
//! Plays a few rounds with the autopilot against the commander AI and prints
//! the results. Config comes from the first CLI argument or
//! `MOTHERSHIP_CONFIG`; `MOTHERSHIP_SNAPSHOT` names a file for the final
//! frame as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use mothership_defender::settings::{ConfigError, GameConfig};
    use mothership_defender::sim::{GameEvent, GamePhase, RemovalCause, Side, TickInput};
    use mothership_defender::{Session, Snapshot};

    fn config_path() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os("MOTHERSHIP_CONFIG"))
            .map(PathBuf::from)
    }

    fn load_config() -> Result<GameConfig, ConfigError> {
        match config_path() {
            Some(path) => GameConfig::load(&path),
            None => {
                log::info!("No config given, using defaults");
                Ok(GameConfig::default())
            }
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::AlienRemoved {
                id,
                kind,
                cause: RemovalCause::Contact,
            } => log::debug!("{} #{} rammed the defender", kind.as_str(), id),
            GameEvent::PlayerDamaged { amount } => log::trace!("Defender took {} damage", amount),
            GameEvent::MothershipDamaged { amount } => {
                log::trace!("Mothership took {} damage", amount)
            }
            GameEvent::Income { amount } => log::trace!("Mothership earned ${}", amount),
            _ => {}
        }
    }

    /// Play one round to completion or the step limit
    fn play_round(session: &mut Session, max_ticks: u64) {
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        while session.state.phase != GamePhase::GameOver && !session.quit_requested() {
            session.step(&input);
            for event in &session.state.events {
                log_event(event);
            }
            if session.state.time_ticks >= max_ticks {
                log::warn!("Round hit the {} step limit, calling it a draw", max_ticks);
                session.abandon_round();
                break;
            }
        }
    }

    fn write_snapshot(session: &Session, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = Snapshot::capture(&session.state).to_json()?;
        std::fs::write(path, json)?;
        log::info!("Snapshot written to {}", path.display());
        Ok(())
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Defender vs Mothership (headless) starting...");

        let config = match load_config() {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        };

        let rounds = config.settings.demo_rounds;
        let max_ticks = config.settings.demo_max_ticks;
        let mut session = Session::new(config);

        for round in 0..rounds {
            if round > 0 {
                session.restart();
            }
            play_round(&mut session, max_ticks);

            let state = &session.state;
            println!(
                "Round {} (seed {}): {} after {} steps, {} aliens destroyed, defender ${} / mothership ${}",
                round + 1,
                session.round_seed(),
                state.winner.map_or("no winner", |w| w.as_str()),
                state.time_ticks,
                state.aliens_destroyed,
                state.player.money,
                state.mothership.money,
            );
        }

        if let Some(path) = std::env::var_os("MOTHERSHIP_SNAPSHOT").map(PathBuf::from) {
            if let Err(err) = write_snapshot(&session, &path) {
                log::error!("Could not write snapshot: {}", err);
            }
        }

        let history = &session.history;
        println!(
            "\nDefender {} - {} Mothership ({} rounds)",
            history.wins(Side::Defender),
            history.wins(Side::Mothership),
            history.len()
        );
        if let Some(best) = history.fastest_defender_win() {
            println!("Fastest defender win: {} steps (seed {})", best.ticks, best.seed);
        }

        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
