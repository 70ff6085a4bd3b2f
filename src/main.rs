//! Pixel Plumber headless runner
//!
//! Plays a scripted input sequence through the simulation and prints the final
//! frame snapshot as JSON.
//!
//! Usage: `pixel-plumber [config.json] [ticks]`

use pixel_plumber::GameConfig;
use pixel_plumber::sim::{Command, GameEvent, GameState, GameStatus, TickInput, tick};

/// Default run length (one minute of game time)
const DEFAULT_TICKS: u64 = 3600;

/// Run right, hop every 40 ticks, shoot every 20, and take whatever
/// command the current status is waiting for
fn scripted_input(t: u64, status: GameStatus) -> TickInput {
    let command = match status {
        GameStatus::Playing => None,
        GameStatus::LevelComplete => Some(Command::AdvanceLevel),
        GameStatus::GameOver | GameStatus::Win => Some(Command::Restart),
    };
    TickInput {
        move_left: false,
        move_right: t % 200 < 180,
        jump_pressed: t % 40 == 0,
        shoot_pressed: t % 20 == 10,
        command,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        // Validated on load
        Some(path) => GameConfig::load(&path)?,
        None => GameConfig::default(),
    };
    let ticks = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    log::info!("Pixel Plumber (headless) starting, seed {}", config.seed);
    let mut state = GameState::new(config)?;

    let mut runs = 0;
    for t in 0..ticks {
        let input = scripted_input(t, state.status);
        tick(&mut state, &input)?;

        for event in state.drain_events() {
            match event {
                GameEvent::StatusChanged {
                    to: GameStatus::GameOver | GameStatus::Win,
                    ..
                } => {
                    runs += 1;
                    log::info!("Run {} over at tick {} ({:?})", runs, t, event);
                }
                GameEvent::ScoreAwarded { .. } | GameEvent::Jumped => {
                    log::trace!("{:?}", event)
                }
                _ => log::debug!("{:?}", event),
            }
        }
    }

    log::info!(
        "Finished {} ticks: level {}, score {}, lives {}",
        ticks,
        state.level_index,
        state.score,
        state.lives
    );
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}
