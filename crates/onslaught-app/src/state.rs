//! State shared between the runner's main thread and the game loop thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use onslaught_core::commands::PlayerCommand;
use onslaught_core::state::GameStateSnapshot;

/// Commands sent from the main thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles the main thread keeps while the loop runs.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex` like the
/// snapshot does.
pub struct RunnerState {
    /// Channel sender to the game loop. `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, replaced by the loop after every frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Set by the loop thread while it is running.
    pub running: Arc<AtomicBool>,
}

impl Default for RunnerState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl RunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Forward a command to the loop. Returns false when no loop is attached
    /// or it has already exited.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(guard) => guard
                .as_ref()
                .map(|tx| tx.send(command).is_ok())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Clone of the most recent snapshot, if any frame has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
