//! Enemy AI system: runs the steering/fire logic from onslaught-ai for every
//! live enemy and writes the results back to the ECS components.

use glam::Vec3;
use hecs::World;

use onslaught_core::components::{Appearance, Enemy, EnemyBrain, Health, Transform};
use onslaught_core::config::GameConfig;
use onslaught_core::constants::{ENEMY_EYE_HEIGHT, ENEMY_RING_SPIN_RATE};
use onslaught_core::enums::EnemyTier;
use onslaught_core::types::Obstacle;

use onslaught_ai::fsm::{evaluate, EnemyContext, EnemyUpdate};
use onslaught_ai::profiles::get_profile;

/// An enemy that decided to fire this frame.
#[derive(Debug, Clone, Copy)]
pub struct EnemyShot {
    pub entity: hecs::Entity,
    pub enemy_id: u32,
    pub tier: EnemyTier,
    /// Muzzle position (enemy eye).
    pub origin: Vec3,
}

/// Advance every live enemy by `dt` toward/around the player at `player_eye`.
/// Returns the shots fired this frame, in iteration order.
pub fn run(
    world: &mut World,
    config: &GameConfig,
    player_eye: Vec3,
    player_height: f32,
    obstacles: &[Obstacle],
    dt: f32,
) -> Vec<EnemyShot> {
    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut updates: Vec<(hecs::Entity, Enemy, EnemyUpdate)> = Vec::new();

    {
        let mut query = world.query::<(&Enemy, &Transform, &Health, &EnemyBrain)>();
        for (entity, (enemy, transform, health, brain)) in query.iter() {
            // Dead enemies wait for cleanup
            if health.current <= 0.0 {
                continue;
            }

            let profile = get_profile(config.enemy(enemy.tier));
            let update = evaluate(&EnemyContext {
                profile: &profile,
                position: transform.position,
                player: player_eye,
                player_height,
                strafe_dir: brain.strafe_dir,
                strafe_timer: brain.strafe_timer,
                fire_cooldown: brain.fire_cooldown,
                obstacles,
                dt,
            });
            updates.push((entity, *enemy, update));
        }
    }

    // Apply updates
    let mut shots = Vec::new();
    for (entity, enemy, update) in updates {
        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            transform.position = update.position;
            transform.yaw = update.yaw;
        }
        if let Ok(mut brain) = world.get::<&mut EnemyBrain>(entity) {
            brain.strafe_dir = update.strafe_dir;
            brain.strafe_timer = update.strafe_timer;
            brain.fire_cooldown = update.fire_cooldown;
        }
        if let Ok(mut appearance) = world.get::<&mut Appearance>(entity) {
            appearance.ring_angle =
                (appearance.ring_angle + ENEMY_RING_SPIN_RATE * dt) % std::f32::consts::TAU;
        }

        if update.fire {
            shots.push(EnemyShot {
                entity,
                enemy_id: enemy.id,
                tier: enemy.tier,
                origin: update.position + Vec3::Y * ENEMY_EYE_HEIGHT,
            });
        }
    }
    shots
}
