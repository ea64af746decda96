//! Ember Vale Demo Runner
//!
//! Headless driver for the simulation core: builds the embedded demo level
//! (or loads a grid text file given as the first argument, with an optional
//! config JSON as the second), then runs a scripted session and logs the
//! events the presentation layer would consume.

use anyhow::Context;
use tracing::{info, Level as LogLevel};
use tracing_subscriber::FmtSubscriber;

use ember_vale::{
    game::{
        config::GameConfig,
        events::GameEventData,
        input::InputFrame,
        level::Level,
        state::{GameState, SessionPhase},
        tick::tick,
    },
    TICK_RATE, VERSION,
};

/// Built-in level: a solid floor, a coin under the spawn, a floating flame,
/// a patrolling enemy, and the exit flag at the far right.
const DEMO_LEVEL: &str = "\
,,,,,,,,,
,,,,,,,,,
,,,,,,,,,
,,,,,,,,,
,P,,,,,,,,
,,,,,,,,,
,C,F,,,384E672E2E40E96,,C,,G
B,B,B,B,B,B,B,B,B,B";

/// Longest session the demo will run (one simulated minute).
const MAX_TICKS: u32 = 60 * TICK_RATE;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LogLevel::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Ember Vale Core v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let mut args = std::env::args().skip(1);
    let level_path = args.next();
    let config = match args.next() {
        Some(path) => GameConfig::from_path(&path)
            .with_context(|| format!("failed to load config {path}"))?,
        None => GameConfig::default(),
    };

    let level = match &level_path {
        Some(path) => {
            info!("Loading level {path}");
            Level::from_path(path, config.cell_size)
                .with_context(|| format!("failed to load level {path}"))?
        }
        None => {
            info!("Running embedded demo level");
            Level::parse(DEMO_LEVEL, config.cell_size).context("demo level is malformed")?
        }
    };

    info!(
        "Level: {} entities, spawn at ({:.0}, {:.0})",
        level.entities.len(),
        level.player_spawn.x,
        level.player_spawn.y
    );

    let mut state = GameState::from_level(level, &config);
    run_session(&mut state, &config);

    info!("=== Session Results ===");
    info!("Ticks simulated: {}", state.tick);
    info!(
        "Outcome: {}",
        match state.phase {
            SessionPhase::Complete => "level complete",
            SessionPhase::GameOver => "game over",
            SessionPhase::Playing => "time limit reached",
        }
    );
    info!("Coins collected: {}", state.coins_collected);
    info!(
        "Health remaining: {}/{}",
        state.player.health, state.player.max_health
    );
    info!(
        "Final position: ({:.1}, {:.1}), camera offset ({:.1}, {:.1})",
        state.player.bounds.x, state.player.bounds.y, state.camera.offset.x, state.camera.offset.y
    );

    Ok(())
}

/// Drive the session with a scripted input stream: ride the spawn drop
/// straight down, then hold right with a hop every two seconds. A frontend
/// would sample real keys here instead.
fn run_session(state: &mut GameState, config: &GameConfig) {
    for t in 0..MAX_TICKS {
        let falling_in = t < 140;
        let mut input = InputFrame::with_movement(false, !falling_in);
        input.set_jump(!falling_in && t % 120 == 60);

        let result = tick(state, &input, config);

        for event in &result.events {
            match &event.data {
                GameEventData::DamageTaken { remaining_health } => {
                    info!(
                        "Tick {}: damage taken, {remaining_health} health left",
                        event.tick
                    );
                }
                GameEventData::CoinCollected { entity_id, total } => {
                    info!(
                        "Tick {}: coin {entity_id} collected ({total} total)",
                        event.tick
                    );
                }
                GameEventData::GoalReached { entity_id } => {
                    info!("Tick {}: reached the flag (entity {entity_id})", event.tick);
                }
                GameEventData::PlayerDied => {
                    info!("Tick {}: player died", event.tick);
                }
            }
        }

        if result.game_over || result.level_complete {
            break;
        }
    }
}
