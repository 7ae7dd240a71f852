//! Game state snapshot: the read-only view handed to presentation each frame.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{FinalStats, GameEvent};
use crate::types::SimTime;

/// Complete visible state after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub session: SessionView,
    pub player: PlayerView,
    pub weapon: WeaponView,
    pub enemies: Vec<EnemyView>,
    pub pickups: Vec<PickupView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
    /// Present once the game has ended.
    pub final_stats: Option<FinalStats>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub phase: WavePhase,
    pub enemies_alive: u32,
}

/// Score and counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub score: u32,
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// Percent, rounded. Zero when nothing has been fired.
    pub accuracy: u32,
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerupView {
    pub kind: PowerupKind,
    pub remaining_secs: f32,
}

/// Player status for HUD and camera.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerView {
    /// Eye position.
    pub position: Vec3,
    pub velocity: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    pub max_armor: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub on_ground: bool,
    pub sprinting: bool,
    /// Current camera field of view (degrees).
    pub fov: f32,
    pub head_bob_time: f32,
    pub landing_impact: f32,
    pub camera_shake: f32,
    pub powerup: Option<PowerupView>,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
}

/// Ammo counts of one weapon slot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AmmoView {
    pub kind: WeaponKind,
    pub magazine: u32,
    pub reserve: u32,
}

/// Active weapon state, including cosmetic accumulators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub magazine: u32,
    pub magazine_size: u32,
    pub reserve: u32,
    pub reloading: bool,
    /// 0..1 progress of the running reload.
    pub reload_progress: f32,
    pub zoomed: bool,
    pub bloom: f32,
    /// Base spread plus bloom, for the crosshair.
    pub spread: f32,
    pub shots_in_burst: u32,
    pub recoil_pitch: f32,
    pub recoil_yaw: f32,
    pub fov_punch: f32,
    pub shake_intensity: f32,
    pub shake_offset: Vec2,
    pub chroma: f32,
    pub kick_back: f32,
    pub kick_rotation: f32,
    pub micro_shake: Vec2,
    pub sway: Vec2,
    pub sprint_blend: f32,
    pub reload_blend: f32,
    pub bob_offset: Vec2,
    pub slots: Vec<AmmoView>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub tier: EnemyTier,
    /// Ground position.
    pub position: Vec3,
    pub yaw: f32,
    pub health: f32,
    pub max_health: f32,
    pub ring_angle: f32,
    pub tint: u32,
    pub emissive: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u32,
    pub kind: PickupKind,
    pub position: Vec3,
}
