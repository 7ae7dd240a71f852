use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use onslaught_app::game_loop::spawn_game_loop;
use onslaught_app::options::Cli;
use onslaught_app::state::{GameLoopCommand, RunnerState};

/// How often the main thread checks on the loop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = match Cli::parse().into_options() {
        Ok(options) => options,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(seed = options.sim.seed, "starting headless run");

    let state = RunnerState::new();
    let (tx, handle) = match spawn_game_loop(
        options.sim,
        state.latest_snapshot.clone(),
        state.running.clone(),
    ) {
        Ok(spawned) => spawned,
        Err(e) => {
            error!("Failed to spawn game loop thread: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }

    let deadline = Instant::now() + options.max_duration;
    while state.is_running() {
        if Instant::now() >= deadline {
            let wave = state.snapshot().map(|s| s.wave.number).unwrap_or(0);
            warn!(wave, "time limit reached before game over");
            if !state.send(GameLoopCommand::Shutdown) {
                debug!("game loop already stopped");
            }
            break;
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    let stats = match handle.join() {
        Ok(stats) => stats,
        Err(_) => {
            error!("game loop thread panicked");
            return ExitCode::FAILURE;
        }
    };

    match stats {
        Some(stats) => println!(
            "GAME OVER  wave {}  kills {}  accuracy {}%  time {:.1}s  score {}",
            stats.wave, stats.kills, stats.accuracy, stats.elapsed_secs, stats.score
        ),
        None => {
            if let Some(snapshot) = state.snapshot() {
                println!(
                    "STOPPED  wave {}  kills {}  accuracy {}%  time {:.1}s  score {}",
                    snapshot.wave.number,
                    snapshot.session.kills,
                    snapshot.session.accuracy,
                    snapshot.session.elapsed_secs,
                    snapshot.session.score
                );
            }
        }
    }
    ExitCode::SUCCESS
}
