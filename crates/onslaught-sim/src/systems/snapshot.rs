//! Snapshot system: reads the ECS world and engine state and builds a
//! complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use onslaught_core::components::*;
use onslaught_core::enums::*;
use onslaught_core::events::GameEvent;
use onslaught_core::state::*;
use onslaught_core::types::SimTime;

use crate::player::PlayerController;
use crate::session::GameSession;
use crate::weapons::WeaponSystem;

/// Build a complete GameStateSnapshot from the current state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    session: &GameSession,
    player: &PlayerController,
    weapon: &WeaponSystem,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let enemies = build_enemies(world);
    let enemies_alive = enemies.iter().filter(|e| e.health > 0.0).count() as u32;

    GameStateSnapshot {
        time: *time,
        phase,
        wave: WaveView {
            number: session.wave,
            phase: session.wave_phase,
            enemies_alive,
        },
        session: session.view(time.elapsed_secs),
        player: build_player(player, weapon),
        weapon: build_weapon(player, weapon),
        enemies,
        pickups: build_pickups(world),
        events,
        final_stats: session.final_stats(),
    }
}

fn build_player(player: &PlayerController, weapon: &WeaponSystem) -> PlayerView {
    let cfg = player.config();
    PlayerView {
        position: player.position,
        velocity: player.velocity,
        pitch: player.pitch,
        yaw: player.yaw,
        health: player.health,
        max_health: cfg.max_health,
        armor: player.armor,
        max_armor: cfg.max_armor,
        stamina: player.stamina,
        max_stamina: cfg.max_stamina,
        on_ground: player.on_ground,
        sprinting: player.sprinting,
        fov: player.fov,
        head_bob_time: player.head_bob_time,
        landing_impact: player.landing_impact,
        camera_shake: weapon.shake_intensity,
        powerup: player.powerup.map(|p| PowerupView {
            kind: p.kind,
            remaining_secs: p.remaining,
        }),
        damage_multiplier: player.damage_multiplier,
        speed_multiplier: player.speed_multiplier,
    }
}

fn build_weapon(player: &PlayerController, weapon: &WeaponSystem) -> WeaponView {
    let cfg = weapon.config();
    WeaponView {
        kind: weapon.current(),
        magazine: weapon.magazine(),
        magazine_size: cfg.magazine_size,
        reserve: weapon.reserve(),
        reloading: weapon.is_reloading(),
        reload_progress: weapon.reload_progress(),
        zoomed: weapon.is_zoomed(),
        bloom: weapon.bloom,
        spread: weapon.current_spread(
            player.on_ground,
            player.sprinting,
            player.horizontal_speed(),
        ),
        shots_in_burst: weapon.shots_in_burst,
        recoil_pitch: weapon.recoil_pitch,
        recoil_yaw: weapon.recoil_yaw,
        fov_punch: weapon.fov_punch,
        shake_intensity: weapon.shake_intensity,
        shake_offset: weapon.shake_offset,
        chroma: weapon.chroma,
        kick_back: weapon.kick_back,
        kick_rotation: weapon.kick_rotation,
        micro_shake: weapon.micro_shake,
        sway: weapon.sway,
        sprint_blend: weapon.sprint_blend,
        reload_blend: weapon.reload_blend,
        bob_offset: weapon.bob_offset,
        slots: WeaponKind::ALL
            .iter()
            .zip(weapon.slots().iter())
            .map(|(&kind, slot)| AmmoView {
                kind,
                magazine: slot.magazine,
                reserve: slot.reserve,
            })
            .collect(),
    }
}

/// Enemy views sorted by id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Transform, &Health, &Appearance)>()
        .iter()
        .map(|(_, (enemy, transform, health, appearance))| EnemyView {
            id: enemy.id,
            tier: enemy.tier,
            position: transform.position,
            yaw: transform.yaw,
            health: health.current,
            max_health: health.max,
            ring_angle: appearance.ring_angle,
            tint: appearance.tint,
            emissive: appearance.emissive,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

/// Uncollected pickups sorted by id.
fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &Transform)>()
        .iter()
        .filter(|(_, (pickup, _))| !pickup.collected)
        .map(|(_, (pickup, transform))| PickupView {
            id: pickup.id,
            kind: pickup.kind,
            position: transform.position,
        })
        .collect();
    pickups.sort_by_key(|p| p.id);
    pickups
}
