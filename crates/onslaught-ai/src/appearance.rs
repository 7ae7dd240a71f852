//! Health-driven enemy appearance. Cosmetic only.

use onslaught_core::constants::{ENEMY_DAMAGED_COLOR, ENEMY_MAX_EMISSIVE};

/// Blend `base` toward the damaged color by `1 - health_ratio`.
pub fn tint_for_health(base: u32, health_ratio: f32) -> u32 {
    let t = (1.0 - health_ratio).clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let from = ((base >> shift) & 0xff) as f32;
        let to = ((ENEMY_DAMAGED_COLOR >> shift) & 0xff) as f32;
        ((from + (to - from) * t).round() as u32).min(0xff) << shift
    };
    channel(16) | channel(8) | channel(0)
}

/// Emissive intensity for a health ratio.
pub fn emissive_for_health(health_ratio: f32) -> f32 {
    ENEMY_MAX_EMISSIVE * health_ratio.clamp(0.0, 1.0)
}
