//! Game loop thread: steps the simulation with measured wall-clock deltas at
//! a nominal 60 Hz.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via an `mpsc` channel, the autopilot supplies
//! per-frame input, and every snapshot is stored in shared state for polling.
//! The thread returns the final stats when the game ends. Wall-clock limits
//! are the caller's business: it sends `Shutdown`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use onslaught_core::commands::{InputFrame, PlayerCommand};
use onslaught_core::constants::NOMINAL_FRAME_RATE;
use onslaught_core::enums::GamePhase;
use onslaught_core::events::{FinalStats, GameEvent};
use onslaught_core::state::GameStateSnapshot;
use onslaught_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration =
    Duration::from_nanos(1_000_000_000 / NOMINAL_FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// `running` is raised before this returns and lowered when the thread
/// exits. Returns the command sender and the join handle, which yields the
/// final stats once the game is over.
pub fn spawn_game_loop(
    sim: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    running: Arc<AtomicBool>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<Option<FinalStats>>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    running.store(true, Ordering::Release);
    let flag = running.clone();
    let spawned = std::thread::Builder::new()
        .name("onslaught-game-loop".into())
        .spawn(move || {
            let stats = run_game_loop(sim, cmd_rx, &latest_snapshot);
            flag.store(false, Ordering::Release);
            stats
        });
    let handle = match spawned {
        Ok(handle) => handle,
        Err(e) => {
            running.store(false, Ordering::Release);
            return Err(e);
        }
    };

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until game over, Shutdown or channel disconnect.
fn run_game_loop(
    sim: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> Option<FinalStats> {
    let mut engine = SimulationEngine::new(sim);
    let mut autopilot = Autopilot::new();
    engine.queue_command(PlayerCommand::StartGame);

    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    let mut snapshot = engine.step(0.0, &InputFrame::default());

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shutdown requested");
                    return snapshot.final_stats;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return snapshot.final_stats,
            }
        }

        // 2. Autopilot input from the previous frame
        let (input, commands) = autopilot.next(&snapshot);
        engine.queue_commands(commands);

        // 3. Advance one frame with the measured delta (the engine clamps it)
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        snapshot = engine.step(dt, &input);
        log_events(&snapshot.events);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        if snapshot.phase == GamePhase::GameOver {
            return snapshot.final_stats;
        }

        // 5. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PlayerDamaged {
                amount,
                health,
                armor,
                relative_angle,
            } => debug!(amount, health, armor, relative_angle, "player hit"),
            GameEvent::WeaponSwitched { weapon } => {
                debug!(weapon = weapon.name(), "autopilot switched weapon")
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame);

        // Run past the first wave spawn
        for _ in 0..90 {
            engine.step(1.0 / 60.0, &InputFrame::default());
        }

        let snapshot = engine.step(1.0 / 60.0, &InputFrame::default());
        assert!(!snapshot.enemies.is_empty());
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let dt = 1.0 / 60.0;

        engine.queue_command(PlayerCommand::StartGame);
        let snap = engine.step(dt, &InputFrame::default());
        assert_eq!(snap.phase, GamePhase::Active);

        engine.queue_command(PlayerCommand::Pause);
        let snap = engine.step(dt, &InputFrame::default());
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_frame = snap.time.frame;

        // Step while paused, time should not advance
        let snap = engine.step(dt, &InputFrame::default());
        assert_eq!(snap.time.frame, paused_frame);

        engine.queue_command(PlayerCommand::Resume);
        let snap = engine.step(dt, &InputFrame::default());
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.frame > paused_frame);
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_loop_shuts_down_on_command() {
        let latest = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(false));
        let (tx, handle) =
            spawn_game_loop(SimConfig::default(), latest.clone(), running.clone()).unwrap();
        assert!(running.load(Ordering::Acquire), "Raised before spawn returns");

        std::thread::sleep(Duration::from_millis(100));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let stats = handle.join().unwrap();

        assert!(stats.is_none(), "Game was still running");
        assert!(!running.load(Ordering::Acquire));
        let snapshot = latest.lock().unwrap().clone();
        assert!(snapshot.is_some());
    }
}
