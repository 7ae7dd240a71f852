//! Cleanup system: removes dead enemies and collected pickups.

use hecs::{Entity, World};

use onslaught_core::components::{Enemy, Health, Pickup};

/// Despawn entities marked for removal during the frame.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Enemies at or below zero health.
    for (entity, (health, _enemy)) in world.query_mut::<(&Health, &Enemy)>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // Collected pickups.
    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.collected {
            despawn_buffer.push(entity);
        }
    }

    // Despawn collected entities.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Number of live enemies.
pub fn enemies_alive(world: &World) -> u32 {
    world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, health))| health.current > 0.0)
        .count() as u32
}
