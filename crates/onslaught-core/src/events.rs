//! One-shot events emitted by the simulation for audio, HUD and effects.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Final statistics reported once when the player dies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub wave: u32,
    pub kills: u32,
    /// Percent of trigger pulls that hit an enemy, rounded.
    pub accuracy: u32,
    pub elapsed_secs: f64,
    pub score: u32,
}

/// Discrete game events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Player weapon ---
    /// The player pulled the trigger and a shot left the weapon.
    ShotFired { weapon: WeaponKind },
    /// Trigger pulled on an empty magazine.
    DryFire { weapon: WeaponKind },
    ReloadStarted { weapon: WeaponKind, duration_secs: f32 },
    ReloadCompleted { weapon: WeaponKind, magazine: u32, reserve: u32 },
    WeaponSwitched { weapon: WeaponKind },
    ZoomChanged { zoomed: bool },

    // --- Combat ---
    /// A player shot damaged an enemy.
    HitConfirmed {
        enemy_id: u32,
        zone: HitZone,
        damage: f32,
        point: Vec3,
    },
    EnemyKilled {
        enemy_id: u32,
        tier: EnemyTier,
        headshot: bool,
        score: u32,
    },
    /// A shot that hit nothing alive struck arena geometry.
    SurfaceImpact {
        point: Vec3,
        normal: Vec3,
        material: Material,
    },
    /// An enemy fired.
    EnemyFired { enemy_id: u32, weapon: WeaponKind },
    /// The player took damage. `relative_angle` is the attacker bearing
    /// relative to the view, in degrees (0 = ahead, positive = left).
    PlayerDamaged {
        amount: f32,
        health: f32,
        armor: f32,
        relative_angle: f32,
    },
    /// An enemy round passed close to the player without hitting.
    NearMiss { point: Vec3 },
    Landed { impact: f32 },

    // --- Pickups ---
    PickupSpawned { kind: PickupKind, position: Vec3 },
    PickupCollected { kind: PickupKind },

    // --- Session ---
    WaveStarted { wave: u32, enemies: u32 },
    WaveCleared { wave: u32, bonus: u32 },
    GameOver { stats: FinalStats },
}
