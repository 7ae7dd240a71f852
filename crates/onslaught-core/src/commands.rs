//! Player input delivered to the simulation.
//!
//! Discrete actions are queued as [`PlayerCommand`]s and applied at the next
//! frame boundary. Held inputs arrive every frame as an [`InputFrame`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete, edge-triggered player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Start a new game, superseding any running one.
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Pause if running, resume if paused.
    TogglePause,

    // --- Actions ---
    /// Jump press. Buffered for a short window.
    Jump,
    /// Start reloading the active weapon.
    Reload,
    /// Select a weapon by slot index (0..=8).
    SelectWeapon { index: usize },
    /// Cycle the active weapon by +1/-1 with wraparound.
    ScrollWeapon { delta: i32 },
}

/// Held inputs sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Movement intent: x = strafe right, y = forward. Length ≤ 1 expected.
    pub move_intent: Vec2,
    pub sprint_held: bool,
    /// Whether the jump key is still down (releasing early cuts the jump).
    pub jump_held: bool,
    pub fire_held: bool,
    /// Zoom is requested while this is held.
    pub aim_held: bool,
    /// Look rotation for this frame in radians: x = yaw delta, y = pitch delta.
    pub look_delta: Vec2,
}
