//! Wave spawning: tier quotas per wave and spawn-point assignment.

use glam::Vec3;
use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;

use onslaught_core::config::GameConfig;
use onslaught_core::constants::{HEAVY_TIER_UNLOCK_WAVE, MEDIUM_TIER_UNLOCK_WAVE};
use onslaught_core::enums::EnemyTier;

use crate::world_setup::spawn_enemy;

/// Enemy counts per tier for one wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveComposition {
    pub light: u32,
    pub medium: u32,
    pub heavy: u32,
}

impl WaveComposition {
    pub fn total(&self) -> u32 {
        self.light + self.medium + self.heavy
    }
}

/// Tier quotas for wave `wave` (1-based).
///
/// Light enemies grow by one every wave. Medium enemies appear from wave 3
/// at half the wave number, heavy enemies from wave 5 at a third of it.
pub fn wave_composition(wave: u32) -> WaveComposition {
    WaveComposition {
        light: 3 + wave,
        medium: if wave >= MEDIUM_TIER_UNLOCK_WAVE {
            wave / 2
        } else {
            0
        },
        heavy: if wave >= HEAVY_TIER_UNLOCK_WAVE {
            wave / 3
        } else {
            0
        },
    }
}

/// Spawn wave `wave`. Spawn points are shuffled once per call and handed
/// out in order, wrapping when there are more enemies than points.
/// Returns the number of enemies spawned.
pub fn spawn_wave<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &GameConfig,
    spawn_points: &[Vec3],
    wave: u32,
    next_enemy_id: &mut u32,
) -> u32 {
    if spawn_points.is_empty() {
        return 0;
    }

    let mut points = spawn_points.to_vec();
    points.shuffle(rng);

    let composition = wave_composition(wave);
    let roster = [
        (EnemyTier::Light, composition.light),
        (EnemyTier::Medium, composition.medium),
        (EnemyTier::Heavy, composition.heavy),
    ];

    let mut spawn_index = 0;
    for (tier, count) in roster {
        let enemy_config = config.enemy(tier);
        for _ in 0..count {
            let position = points[spawn_index % points.len()];
            spawn_index += 1;
            spawn_enemy(world, rng, enemy_config, *next_enemy_id, position);
            *next_enemy_id += 1;
        }
    }
    composition.total()
}
