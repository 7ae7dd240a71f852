//! Combat resolution: player shots against enemies and arena, enemy shots
//! against the player, damage application and kill bookkeeping.
//!
//! Enemies killed here are only marked (health at or below zero). The
//! cleanup system removes them at the end of the frame, and every query in
//! this module skips marked enemies, so a dead enemy cannot be hit twice.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use onslaught_ai::appearance::{emissive_for_health, tint_for_health};
use onslaught_core::components::{Appearance, Enemy, Health, Transform};
use onslaught_core::config::GameConfig;
use onslaught_core::constants::{HEADSHOT_MULTIPLIER, NEAR_MISS_MARGIN, PLAYER_SHOT_RANGE};
use onslaught_core::enums::{HitZone, Material};
use onslaught_core::events::GameEvent;
use onslaught_core::types::{enemy_body_box, enemy_head_box, Aabb, Obstacle, Ray, RayHit};

use crate::session::GameSession;
use crate::systems::pickups;

/// What a single player shot ray struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotResult {
    Enemy {
        entity: Entity,
        enemy_id: u32,
        zone: HitZone,
        point: Vec3,
    },
    Surface {
        hit: RayHit,
        material: Material,
    },
    Miss,
}

/// Damage actually applied to an enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub dealt: f32,
    pub killed: bool,
}

/// Outcome of one enemy shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyShotOutcome {
    /// Arena geometry stopped the round before it reached the player.
    Blocked { hit: RayHit, material: Material },
    Hit,
    /// Missed the player box but passed through the near-miss margin.
    NearMiss { point: Vec3 },
    Miss,
}

/// Trace one player shot. The first live enemy in iteration order whose
/// head or body box the ray touches takes the shot, head first. Only when no
/// enemy is touched is the ray tested against the arena.
pub fn trace_player_shot(world: &World, ray: &Ray, obstacles: &[Obstacle]) -> ShotResult {
    let mut query = world.query::<(&Enemy, &Transform, &Health)>();
    for (entity, (enemy, transform, health)) in query.iter() {
        if health.current <= 0.0 {
            continue;
        }
        let pos = transform.position;
        let hit = ray
            .intersect_aabb(&enemy_head_box(pos), PLAYER_SHOT_RANGE)
            .map(|hit| (HitZone::Head, hit))
            .or_else(|| {
                ray.intersect_aabb(&enemy_body_box(pos), PLAYER_SHOT_RANGE)
                    .map(|hit| (HitZone::Body, hit))
            });
        if let Some((zone, hit)) = hit {
            return ShotResult::Enemy {
                entity,
                enemy_id: enemy.id,
                zone,
                point: hit.point,
            };
        }
    }

    match nearest_surface(ray, obstacles, PLAYER_SHOT_RANGE, true) {
        Some((hit, material)) => ShotResult::Surface { hit, material },
        None => ShotResult::Miss,
    }
}

/// Closest arena surface along the ray within `max_distance`, optionally
/// including the floor.
fn nearest_surface(
    ray: &Ray,
    obstacles: &[Obstacle],
    max_distance: f32,
    include_floor: bool,
) -> Option<(RayHit, Material)> {
    let floor = if include_floor {
        ray.intersect_ground(0.0, max_distance)
            .map(|hit| (hit, Material::Concrete))
    } else {
        None
    };
    obstacles
        .iter()
        .filter_map(|o| ray.intersect_aabb(&o.bounds, max_distance).map(|h| (h, o.material)))
        .chain(floor)
        .min_by(|a, b| a.0.distance.total_cmp(&b.0.distance))
}

/// Apply damage to an enemy, doubled for a headshot. Returns `None` for a
/// despawned or already dead enemy, which is left untouched.
pub fn damage_enemy(
    world: &mut World,
    config: &GameConfig,
    entity: Entity,
    amount: f32,
    headshot: bool,
) -> Option<DamageOutcome> {
    let dealt = if headshot {
        amount * HEADSHOT_MULTIPLIER
    } else {
        amount
    };

    let (tier, ratio, killed) = {
        let mut query = world
            .query_one::<(&Enemy, &mut Health)>(entity)
            .ok()?;
        let (enemy, health) = query.get()?;
        if health.current <= 0.0 {
            return None;
        }
        health.current = (health.current - dealt).max(0.0);
        let ratio = health.current / health.max;
        (enemy.tier, ratio, health.current <= 0.0)
    };

    if let Ok(mut appearance) = world.get::<&mut Appearance>(entity) {
        appearance.tint = tint_for_health(config.enemy(tier).color, ratio);
        appearance.emissive = emissive_for_health(ratio);
    }

    Some(DamageOutcome { dealt, killed })
}

/// Resolve every pellet of a player volley, update the session and emit
/// feedback events. Returns true when any pellet hit an enemy.
#[allow(clippy::too_many_arguments)]
pub fn resolve_player_volley<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &GameConfig,
    session: &mut GameSession,
    next_pickup_id: &mut u32,
    events: &mut Vec<GameEvent>,
    origin: Vec3,
    directions: &[Vec3],
    damage: f32,
    obstacles: &[Obstacle],
) -> bool {
    let mut any_hit = false;

    for &direction in directions {
        let ray = Ray::new(origin, direction);
        match trace_player_shot(world, &ray, obstacles) {
            ShotResult::Enemy {
                entity,
                enemy_id,
                zone,
                point,
            } => {
                let headshot = zone == HitZone::Head;
                let Some(outcome) = damage_enemy(world, config, entity, damage, headshot) else {
                    continue;
                };
                any_hit = true;
                events.push(GameEvent::HitConfirmed {
                    enemy_id,
                    zone,
                    damage: outcome.dealt,
                    point,
                });
                if outcome.killed {
                    resolve_kill(
                        world,
                        rng,
                        config,
                        session,
                        next_pickup_id,
                        events,
                        entity,
                        headshot,
                    );
                }
            }
            ShotResult::Surface { hit, material } => {
                events.push(GameEvent::SurfaceImpact {
                    point: hit.point,
                    normal: hit.normal,
                    material,
                });
            }
            ShotResult::Miss => {}
        }
    }

    session.record_shot(any_hit);
    any_hit
}

/// Score a kill and roll for a drop at the enemy's position.
#[allow(clippy::too_many_arguments)]
fn resolve_kill<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &GameConfig,
    session: &mut GameSession,
    next_pickup_id: &mut u32,
    events: &mut Vec<GameEvent>,
    entity: Entity,
    headshot: bool,
) {
    let Ok((enemy, position)) = world
        .query_one_mut::<(&Enemy, &Transform)>(entity)
        .map(|(enemy, transform)| (*enemy, transform.position))
    else {
        return;
    };

    let score = config.enemy(enemy.tier).score;
    session.record_kill(score);
    debug!(
        enemy_id = enemy.id,
        tier = ?enemy.tier,
        headshot,
        score,
        "enemy killed"
    );
    events.push(GameEvent::EnemyKilled {
        enemy_id: enemy.id,
        tier: enemy.tier,
        headshot,
        score,
    });

    pickups::roll_enemy_drop(world, rng, next_pickup_id, position, events);
}

/// Trace one enemy shot toward the player.
///
/// `target` is the point the enemy aimed at; geometry is only cover when it
/// is struck closer than that point.
pub fn resolve_enemy_shot(
    origin: Vec3,
    direction: Vec3,
    target: Vec3,
    player_box: &Aabb,
    obstacles: &[Obstacle],
) -> EnemyShotOutcome {
    let ray = Ray::new(origin, direction);
    let target_distance = origin.distance(target);

    if let Some((hit, material)) = nearest_surface(&ray, obstacles, target_distance, false) {
        return EnemyShotOutcome::Blocked { hit, material };
    }

    let reach = target_distance * 2.0 + NEAR_MISS_MARGIN;
    if ray.intersect_aabb(player_box, reach).is_some() {
        return EnemyShotOutcome::Hit;
    }
    let near_box = player_box.expanded(NEAR_MISS_MARGIN, NEAR_MISS_MARGIN);
    match ray.intersect_aabb(&near_box, reach) {
        Some(hit) => EnemyShotOutcome::NearMiss { point: hit.point },
        None => EnemyShotOutcome::Miss,
    }
}
