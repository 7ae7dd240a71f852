//! Tier-specific behavioral profiles.
//!
//! Consolidates the per-tier parameters the steering logic reads, so that a
//! single code path drives every tier.

use onslaught_core::config::EnemyConfig;
use onslaught_core::constants::*;

/// Behavioral profile for an enemy tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorProfile {
    /// Movement speed (m/s).
    pub speed: f32,
    /// Speed while backing away from a too-close player.
    pub retreat_speed: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    /// Maximum distance at which the enemy opens fire (m).
    pub engage_range: f32,
    /// Beyond this distance the enemy advances.
    pub advance_distance: f32,
    /// Inside this distance the enemy retreats.
    pub retreat_distance: f32,
    /// Aim error scale.
    pub accuracy: f32,
}

/// Get the behavioral profile for a tier's stat block.
pub fn get_profile(config: &EnemyConfig) -> BehaviorProfile {
    BehaviorProfile {
        speed: config.speed,
        retreat_speed: config.speed * ENEMY_RETREAT_SPEED_FACTOR,
        fire_interval: 1.0 / config.fire_rate,
        engage_range: ENEMY_ENGAGE_RANGE,
        advance_distance: ENEMY_ADVANCE_DISTANCE,
        retreat_distance: ENEMY_RETREAT_DISTANCE,
        accuracy: config.accuracy,
    }
}
