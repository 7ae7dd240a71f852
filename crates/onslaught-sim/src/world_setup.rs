//! Arena geometry and entity spawn factories.

use glam::Vec3;
use hecs::World;
use rand::Rng;

use onslaught_ai::appearance::{emissive_for_health, tint_for_health};
use onslaught_ai::perception::initial_strafe_dir;
use onslaught_core::components::*;
use onslaught_core::config::EnemyConfig;
use onslaught_core::constants::*;
use onslaught_core::enums::{Material, PickupKind};
use onslaught_core::types::{Aabb, Obstacle};

/// Static arena: square floor, box obstacles and enemy spawn points.
#[derive(Debug, Clone)]
pub struct Arena {
    pub half_extent: f32,
    pub obstacles: Vec<Obstacle>,
    pub spawn_points: Vec<Vec3>,
}

impl Arena {
    /// The default combat arena.
    pub fn standard() -> Self {
        Self {
            half_extent: ARENA_HALF_EXTENT,
            obstacles: standard_obstacles(),
            spawn_points: spawn_ring(SPAWN_RING_DISTANCE),
        }
    }

    /// Same bounds and spawn points with no obstacles.
    pub fn open() -> Self {
        Self {
            obstacles: Vec::new(),
            ..Self::standard()
        }
    }

    /// Largest |x| or |z| the player's eye may reach.
    pub fn player_limit(&self) -> f32 {
        self.half_extent - ARENA_WALL_MARGIN
    }
}

/// Eight points on a square ring: corners and edge midpoints.
pub fn spawn_ring(distance: f32) -> Vec<Vec3> {
    let d = distance;
    vec![
        Vec3::new(d, 0.0, d),
        Vec3::new(-d, 0.0, d),
        Vec3::new(d, 0.0, -d),
        Vec3::new(-d, 0.0, -d),
        Vec3::new(d, 0.0, 0.0),
        Vec3::new(-d, 0.0, 0.0),
        Vec3::new(0.0, 0.0, d),
        Vec3::new(0.0, 0.0, -d),
    ]
}

/// Cover layout. Kept off the straight lines from the spawn ring to the
/// arena center.
fn standard_obstacles() -> Vec<Obstacle> {
    let block = |x: f32, z: f32, size: [f32; 3], material: Material| {
        let size = Vec3::from_array(size);
        let center = Vec3::new(x, size.y * 0.5, z);
        Obstacle::new(Aabb::from_center_size(center, size), material)
    };

    vec![
        // Pillars
        block(12.0, 5.0, [2.0, 4.0, 2.0], Material::Concrete),
        block(-12.0, -5.0, [2.0, 4.0, 2.0], Material::Concrete),
        block(5.0, -12.0, [2.0, 4.0, 2.0], Material::Concrete),
        block(-5.0, 12.0, [2.0, 4.0, 2.0], Material::Concrete),
        // Low walls
        block(18.0, 9.0, [0.5, 1.2, 4.0], Material::Metal),
        block(-18.0, -9.0, [0.5, 1.2, 4.0], Material::Metal),
        block(9.0, -18.0, [4.0, 1.2, 0.5], Material::Metal),
        block(-9.0, 18.0, [4.0, 1.2, 0.5], Material::Metal),
        // Crates
        block(6.0, 16.0, [1.5, 1.5, 1.5], Material::Wood),
        block(-6.0, -16.0, [1.5, 1.5, 1.5], Material::Wood),
        block(16.0, -6.0, [1.5, 1.5, 1.5], Material::Wood),
        block(-16.0, 6.0, [1.5, 1.5, 1.5], Material::Wood),
        // Step platform
        block(-8.0, -3.0, [4.0, 0.4, 4.0], Material::Concrete),
    ]
}

/// Spawn an enemy of the given tier at a ground position.
pub fn spawn_enemy<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &EnemyConfig,
    id: u32,
    position: Vec3,
) -> hecs::Entity {
    world.spawn((
        Enemy {
            id,
            tier: config.tier,
        },
        Transform { position, yaw: 0.0 },
        Health {
            current: config.health,
            max: config.health,
        },
        EnemyBrain {
            strafe_dir: initial_strafe_dir(rng),
            strafe_timer: 0.0,
            fire_cooldown: 0.0,
        },
        Appearance {
            ring_angle: 0.0,
            tint: tint_for_health(config.color, 1.0),
            emissive: emissive_for_health(1.0),
        },
    ))
}

/// Spawn a pickup at the given position.
pub fn spawn_pickup(world: &mut World, id: u32, kind: PickupKind, position: Vec3) -> hecs::Entity {
    world.spawn((
        Pickup {
            id,
            kind,
            collected: false,
        },
        Transform { position, yaw: 0.0 },
    ))
}
