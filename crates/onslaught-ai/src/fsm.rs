//! Enemy steering and fire decisions.
//!
//! Pure functions that compute one frame of enemy behavior from the enemy's
//! situation. No ECS dependency; operates on plain data.

use glam::Vec3;

use onslaught_core::constants::*;
use onslaught_core::types::{yaw_of, Obstacle};

use crate::perception::has_line_of_sight;
use crate::profiles::BehaviorProfile;

/// Movement stance chosen from the distance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStance {
    /// Far from the player: close in along the steered direction.
    Advance,
    /// In the comfort band: stay put.
    Hold,
    /// Too close: back away slowly.
    Retreat,
}

/// Input to the steering logic for a single enemy.
pub struct EnemyContext<'a> {
    pub profile: &'a BehaviorProfile,
    /// Ground position.
    pub position: Vec3,
    /// Player eye position.
    pub player: Vec3,
    /// Player eye height above the feet.
    pub player_height: f32,
    pub strafe_dir: f32,
    pub strafe_timer: f32,
    pub fire_cooldown: f32,
    pub obstacles: &'a [Obstacle],
    pub dt: f32,
}

/// Output of the steering logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate {
    /// New ground position; unchanged when the move was rejected.
    pub position: Vec3,
    pub yaw: f32,
    pub stance: EnemyStance,
    pub strafe_dir: f32,
    pub strafe_timer: f32,
    pub fire_cooldown: f32,
    pub move_blocked: bool,
    /// The enemy fires this frame.
    pub fire: bool,
}

/// Evaluate one frame of behavior for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let profile = ctx.profile;

    let flat_self = Vec3::new(ctx.position.x, 0.0, ctx.position.z);
    let flat_player = Vec3::new(ctx.player.x, 0.0, ctx.player.z);
    let to_player = flat_player - flat_self;
    let dist = to_player.length();
    let dir = to_player.try_normalize().unwrap_or(Vec3::ZERO);

    // Facing
    let yaw = if dir == Vec3::ZERO { 0.0 } else { yaw_of(dir) };

    // Strafe bookkeeping
    let mut strafe_dir = ctx.strafe_dir;
    let mut strafe_timer = ctx.strafe_timer + ctx.dt;
    if strafe_timer > ENEMY_STRAFE_INTERVAL {
        strafe_dir = -strafe_dir;
        strafe_timer = 0.0;
    }

    let steer = steering_direction(flat_self, dir, dist, strafe_dir, ctx.obstacles);
    let stance = stance_for(dist, profile);

    let step = match stance {
        EnemyStance::Advance => steer * profile.speed * ctx.dt,
        EnemyStance::Retreat => -dir * profile.retreat_speed * ctx.dt,
        EnemyStance::Hold => Vec3::ZERO,
    };

    let proposed = ctx.position + step;
    let move_blocked = step != Vec3::ZERO && is_blocked(proposed, ctx.obstacles);
    let position = if move_blocked { ctx.position } else { proposed };

    // Fire gate: range, cooldown, then line of sight.
    let mut fire_cooldown = (ctx.fire_cooldown - ctx.dt).max(0.0);
    let mut fire = false;
    if dist < profile.engage_range && fire_cooldown <= 0.0 {
        let eye = Vec3::new(position.x, position.y + ENEMY_EYE_HEIGHT, position.z);
        let aim = aim_point(ctx.player, ctx.player_height);
        if has_line_of_sight(eye, aim, ctx.obstacles) {
            fire = true;
            fire_cooldown = profile.fire_interval;
        }
    }

    EnemyUpdate {
        position,
        yaw,
        stance,
        strafe_dir,
        strafe_timer,
        fire_cooldown,
        move_blocked,
        fire,
    }
}

/// Stance for a horizontal distance to the player.
pub fn stance_for(dist: f32, profile: &BehaviorProfile) -> EnemyStance {
    if dist > profile.advance_distance {
        EnemyStance::Advance
    } else if dist < profile.retreat_distance {
        EnemyStance::Retreat
    } else {
        EnemyStance::Hold
    }
}

/// Desired horizontal movement direction: toward the player, pushed away from
/// nearby obstacles, with a sideways strafe term in the mid-range band.
pub fn steering_direction(
    flat_self: Vec3,
    dir: Vec3,
    dist: f32,
    strafe_dir: f32,
    obstacles: &[Obstacle],
) -> Vec3 {
    let mut steer = dir;

    for obstacle in obstacles {
        let center = obstacle.bounds.center();
        let to_obstacle = Vec3::new(center.x - flat_self.x, 0.0, center.z - flat_self.z);
        let size = obstacle.bounds.size();
        let width = size.x.max(size.z);
        if to_obstacle.length() < width + ENEMY_AVOID_MARGIN {
            if let Some(away) = (-to_obstacle).try_normalize() {
                steer += away * ENEMY_AVOID_WEIGHT;
            }
        }
    }

    if dist > ENEMY_STRAFE_MIN_DISTANCE && dist < ENEMY_STRAFE_MAX_DISTANCE {
        let perpendicular = Vec3::new(-dir.z, 0.0, dir.x) * strafe_dir;
        steer += perpendicular * ENEMY_STRAFE_WEIGHT;
    }

    steer.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Whether a ground position lies inside any obstacle grown by the enemy radius.
pub fn is_blocked(position: Vec3, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| {
        let grown = o.bounds.expanded(ENEMY_RADIUS, 0.0);
        grown.contains_point(position)
    })
}

/// Point on the player that enemies aim at, given the player's eye position
/// and eye height. Short players are aimed at mid-body.
pub fn aim_point(player_eye: Vec3, player_height: f32) -> Vec3 {
    let feet = player_eye.y - player_height;
    Vec3::new(
        player_eye.x,
        feet + PLAYER_AIM_HEIGHT.min(player_height * 0.5),
        player_eye.z,
    )
}
