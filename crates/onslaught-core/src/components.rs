//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// World placement. `position` is at ground level for enemies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Facing around +Y in radians, zero facing -Z.
    pub yaw: f32,
}

/// Marker and identity of a hostile combatant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id for events and snapshots. Never reused within a session.
    pub id: u32,
    pub tier: EnemyTier,
}

/// Hit points. An entity at or below zero is dead and awaits removal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Per-enemy behavior bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    /// +1 or -1.
    pub strafe_dir: f32,
    /// Seconds since the last strafe flip.
    pub strafe_timer: f32,
    /// Seconds until the enemy may fire again.
    pub fire_cooldown: f32,
}

/// Cosmetic state mirrored to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Spin angle of the hover ring (radians).
    pub ring_angle: f32,
    /// Current body tint, 0xRRGGBB.
    pub tint: u32,
    pub emissive: f32,
}

/// A collectible item lying in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    /// Set once collected; the cleanup pass removes it.
    pub collected: bool,
}
