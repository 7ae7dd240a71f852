//! Pickup system: placement after waves, enemy drops and collection.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use tracing::debug;

use onslaught_core::components::{Pickup, Transform};
use onslaught_core::constants::*;
use onslaught_core::enums::{PickupKind, PowerupKind};
use onslaught_core::events::GameEvent;

use crate::player::PlayerController;
use crate::weapons::WeaponSystem;
use crate::world_setup::spawn_pickup;

/// Kinds an enemy can drop.
const DROP_TABLE: [PickupKind; 3] = [PickupKind::Health, PickupKind::Ammo, PickupKind::Armor];

/// Powerup offered after a wave, rotating with the wave number.
pub fn wave_powerup(wave: u32) -> PowerupKind {
    match wave % 3 {
        0 => PowerupKind::Damage,
        1 => PowerupKind::Speed,
        _ => PowerupKind::Rapid,
    }
}

fn place<R: Rng>(
    world: &mut World,
    rng: &mut R,
    next_id: &mut u32,
    kind: PickupKind,
    extent: f32,
    events: &mut Vec<GameEvent>,
) {
    let position = Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * extent,
        PICKUP_HEIGHT,
        (rng.gen::<f32>() - 0.5) * 2.0 * extent,
    );
    spawn_pickup(world, *next_id, kind, position);
    *next_id += 1;
    events.push(GameEvent::PickupSpawned { kind, position });
}

/// Scatter the between-wave supplies: health, ammo and armor anywhere near
/// the middle, an extra health close in when the player is below half
/// health, and the wave's powerup close in.
pub fn spawn_wave_pickups<R: Rng>(
    world: &mut World,
    rng: &mut R,
    next_id: &mut u32,
    wave: u32,
    player: &PlayerController,
    events: &mut Vec<GameEvent>,
) {
    for kind in [PickupKind::Health, PickupKind::Ammo, PickupKind::Armor] {
        place(world, rng, next_id, kind, PICKUP_SCATTER_EXTENT, events);
    }
    if player.health < player.config().max_health * 0.5 {
        place(
            world,
            rng,
            next_id,
            PickupKind::Health,
            PICKUP_NEAR_EXTENT,
            events,
        );
    }
    let powerup = PickupKind::Powerup(wave_powerup(wave));
    place(world, rng, next_id, powerup, PICKUP_NEAR_EXTENT, events);
}

/// Roll the drop chance for a killed enemy standing at `position`.
pub fn roll_enemy_drop<R: Rng>(
    world: &mut World,
    rng: &mut R,
    next_id: &mut u32,
    position: Vec3,
    events: &mut Vec<GameEvent>,
) -> Option<PickupKind> {
    if !rng.gen_bool(ENEMY_DROP_CHANCE) {
        return None;
    }
    let kind = DROP_TABLE[rng.gen_range(0..DROP_TABLE.len())];
    let position = Vec3::new(position.x, PICKUP_HEIGHT, position.z);
    spawn_pickup(world, *next_id, kind, position);
    *next_id += 1;
    events.push(GameEvent::PickupSpawned { kind, position });
    Some(kind)
}

/// Apply one pickup's effect.
pub fn apply_pickup(kind: PickupKind, player: &mut PlayerController, weapon: &mut WeaponSystem) {
    match kind {
        PickupKind::Health => player.heal(HEALTH_PICKUP_AMOUNT),
        PickupKind::Armor => player.add_armor(ARMOR_PICKUP_AMOUNT),
        PickupKind::Ammo => weapon.add_ammo(AMMO_PICKUP_AMOUNT),
        PickupKind::Powerup(powerup) => player.apply_powerup(powerup, POWERUP_DURATION),
    }
}

/// Collect every pickup within reach of the player's eye. Collected pickups
/// are marked and left for cleanup. Returns the number collected.
pub fn collect(
    world: &mut World,
    player: &mut PlayerController,
    weapon: &mut WeaponSystem,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let reach_sq = PICKUP_COLLECT_RADIUS * PICKUP_COLLECT_RADIUS;
    let mut collected = 0;

    for (_entity, (pickup, transform)) in world.query_mut::<(&mut Pickup, &Transform)>() {
        if pickup.collected || player.position.distance_squared(transform.position) >= reach_sq {
            continue;
        }
        pickup.collected = true;
        apply_pickup(pickup.kind, player, weapon);
        debug!(id = pickup.id, kind = ?pickup.kind, "pickup collected");
        events.push(GameEvent::PickupCollected { kind: pickup.kind });
        collected += 1;
    }
    collected
}
