//! Player controller: movement integration, stamina, jumping, collision,
//! resources, powerups and camera-relevant derived state.
//!
//! The player is a plain struct owned by the engine, not an ECS entity.
//! `position` is the eye position; the feet sit `height` below it.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use onslaught_core::config::PlayerConfig;
use onslaught_core::constants::*;
use onslaught_core::enums::PowerupKind;
use onslaught_core::types::{lerp, Aabb, Obstacle};

/// Held movement inputs for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    /// x = strafe right, y = forward.
    pub move_intent: Vec2,
    pub wants_sprint: bool,
    /// Releasing jump while rising cuts the jump short.
    pub jump_held: bool,
}

/// A running powerup and its remaining time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePowerup {
    pub kind: PowerupKind,
    pub remaining: f32,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,

    // --- Kinematics ---
    pub position: Vec3,
    pub velocity: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub on_ground: bool,
    pub sprinting: bool,
    /// Set by a jump, cleared on the next grounded frame.
    pub jumping: bool,
    pub jump_buffer: f32,
    pub coyote_timer: f32,
    can_cut_jump: bool,

    // --- Resources ---
    pub health: f32,
    pub armor: f32,
    pub stamina: f32,

    // --- Powerups ---
    pub powerup: Option<ActivePowerup>,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    pub rapid_fire: bool,

    // --- Camera ---
    pub fov: f32,
    pub head_bob_time: f32,
    pub landing_impact: f32,
}

impl PlayerController {
    pub fn new(config: PlayerConfig) -> Self {
        let mut player = Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            on_ground: true,
            sprinting: false,
            jumping: false,
            jump_buffer: 0.0,
            coyote_timer: 0.0,
            can_cut_jump: false,
            health: config.max_health,
            armor: 0.0,
            stamina: config.max_stamina,
            powerup: None,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            rapid_fire: false,
            fov: config.base_fov,
            head_bob_time: 0.0,
            landing_impact: 0.0,
            config,
        };
        player.reset();
        player
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Return to the spawn state for a new round.
    pub fn reset(&mut self) {
        self.position = Vec3::new(0.0, self.config.height, 0.0);
        self.velocity = Vec3::ZERO;
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.on_ground = true;
        self.sprinting = false;
        self.jumping = false;
        self.jump_buffer = 0.0;
        self.coyote_timer = 0.0;
        self.can_cut_jump = false;
        self.health = self.config.max_health;
        self.armor = 0.0;
        self.stamina = self.config.max_stamina;
        self.clear_powerup();
        self.fov = self.config.base_fov;
        self.head_bob_time = 0.0;
        self.landing_impact = 0.0;
    }

    /// Remember a jump press for the buffer window.
    pub fn request_jump(&mut self) {
        self.jump_buffer = self.config.jump_buffer_time;
    }

    /// Integrate one frame of movement and resolve collisions.
    ///
    /// `bound` is the largest allowed |x| and |z| of the eye position.
    /// Returns the landing impact when the player hit the ground hard enough
    /// to register one.
    pub fn update(
        &mut self,
        dt: f32,
        input: &MoveInput,
        obstacles: &[Obstacle],
        bound: f32,
    ) -> Option<f32> {
        let cfg = &self.config;
        let prev_velocity = self.velocity;
        let wants_jump = self.jump_buffer > 0.0;

        // Input relative to facing
        let (sy, cy) = self.yaw.sin_cos();
        let forward = Vec3::new(-sy, 0.0, -cy);
        let right = Vec3::new(cy, 0.0, -sy);
        let mut wish = right * input.move_intent.x + forward * input.move_intent.y;
        if wish.length_squared() > 1.0 {
            wish = wish.normalize();
        }
        let has_input = input.move_intent.length_squared() > 1e-6;

        // Sprint and stamina
        self.sprinting = input.wants_sprint && has_input && self.on_ground && self.stamina > 0.0;
        if self.sprinting {
            self.stamina -= cfg.stamina_drain * dt;
            if self.stamina <= 0.0 {
                self.stamina = 0.0;
                self.sprinting = false;
            }
        } else {
            self.stamina = (self.stamina + cfg.stamina_regen * dt).min(cfg.max_stamina);
        }

        // Horizontal velocity
        let base_speed = if self.sprinting {
            cfg.sprint_speed
        } else {
            cfg.walk_speed
        };
        let target = wish * base_speed * self.speed_multiplier;
        if has_input {
            let accel = if self.on_ground {
                cfg.ground_accel
            } else {
                cfg.air_accel
            };
            let t = (accel * dt).min(1.0);
            self.velocity.x = lerp(self.velocity.x, target.x, t);
            self.velocity.z = lerp(self.velocity.z, target.z, t);
        } else {
            let decel = if self.on_ground {
                cfg.ground_decel
            } else {
                cfg.air_decel
            };
            let factor = (-decel * dt).exp();
            self.velocity.x *= factor;
            self.velocity.z *= factor;
        }

        self.head_bob_time += dt * self.horizontal_speed() * 2.0;

        // Coyote time and jump buffer
        if self.on_ground {
            self.coyote_timer = cfg.coyote_time;
            self.jumping = false;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }
        self.jump_buffer = (self.jump_buffer - dt).max(0.0);

        if wants_jump && (self.coyote_timer > 0.0 || self.on_ground) {
            self.velocity.y = cfg.jump_force;
            self.jumping = true;
            self.can_cut_jump = true;
            self.jump_buffer = 0.0;
            self.coyote_timer = 0.0;
        }
        if !input.jump_held && self.can_cut_jump && self.velocity.y > 0.0 {
            self.velocity.y *= cfg.jump_cut_factor;
            self.can_cut_jump = false;
        }

        self.velocity.y -= cfg.gravity * dt;

        // Arena bounds
        let mut next = self.position + self.velocity * dt;
        if next.x.abs() > bound {
            next.x = next.x.clamp(-bound, bound);
            self.velocity.x = 0.0;
        }
        if next.z.abs() > bound {
            next.z = next.z.clamp(-bound, bound);
            self.velocity.z = 0.0;
        }

        self.on_ground = false;
        for obstacle in obstacles {
            self.resolve_obstacle(&mut next, &obstacle.bounds);
        }

        // Ground plane
        let mut landed = None;
        let height = self.config.height;
        if next.y <= height {
            let fall_speed = prev_velocity.y.abs();
            if fall_speed > LANDING_IMPACT_THRESHOLD {
                let impact = (fall_speed / LANDING_IMPACT_SCALE).min(1.0);
                self.landing_impact = impact;
                landed = Some(impact);
            }
            next.y = height;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }

        self.position = next;
        landed
    }

    /// Resolve the prospective eye position against one obstacle box.
    fn resolve_obstacle(&mut self, next: &mut Vec3, bounds: &Aabb) {
        let height = self.config.height;
        let body = body_box(*next, height, self.config.radius);
        if !body.intersects(bounds) {
            return;
        }

        let ledge = bounds.max.y - body.min.y;
        if ledge > 0.0 && ledge <= self.config.step_height && self.velocity.y <= 0.0 {
            // Walkable ledge
            next.y = bounds.max.y + height;
            self.velocity.y = 0.0;
            self.on_ground = true;
        } else if body.max.y > bounds.max.y && self.velocity.y < 0.0 {
            // Landing on top
            next.y = bounds.max.y + height;
            self.velocity.y = 0.0;
            self.on_ground = true;
        } else if body.min.y < bounds.min.y && self.velocity.y > 0.0 {
            // Ceiling
            next.y = bounds.min.y;
            self.velocity.y = 0.0;
        } else {
            let overlap_x = (body.max.x - bounds.min.x).min(bounds.max.x - body.min.x);
            let overlap_z = (body.max.z - bounds.min.z).min(bounds.max.z - body.min.z);
            let center = bounds.center();
            if overlap_x < overlap_z {
                next.x += if next.x < center.x { -overlap_x } else { overlap_x };
                self.velocity.x = 0.0;
            } else {
                next.z += if next.z < center.z { -overlap_z } else { overlap_z };
                self.velocity.z = 0.0;
            }
        }
    }

    /// Apply look rotation. Pitch is clamped to straight up/down.
    pub fn rotate(&mut self, look_delta: Vec2) {
        self.yaw = wrap_angle(self.yaw + look_delta.x);
        self.pitch = (self.pitch + look_delta.y).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Apply damage, armor first. Returns true when the player is dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let amount = amount.max(0.0);
        let absorbed = self.armor.min(amount);
        self.armor -= absorbed;
        self.health = (self.health - (amount - absorbed)).max(0.0);
        self.is_dead()
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.config.max_health);
    }

    pub fn add_armor(&mut self, amount: f32) {
        self.armor = (self.armor + amount).clamp(0.0, self.config.max_armor);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Start a powerup, replacing any running one.
    pub fn apply_powerup(&mut self, kind: PowerupKind, duration: f32) {
        self.clear_powerup();
        match kind {
            PowerupKind::Damage => self.damage_multiplier = DAMAGE_POWERUP_MULTIPLIER,
            PowerupKind::Speed => self.speed_multiplier = SPEED_POWERUP_MULTIPLIER,
            PowerupKind::Rapid => self.rapid_fire = true,
        }
        self.powerup = Some(ActivePowerup {
            kind,
            remaining: duration,
        });
    }

    /// Count down the running powerup. Returns its kind when it expires.
    pub fn update_powerup(&mut self, dt: f32) -> Option<PowerupKind> {
        let active = self.powerup.as_mut()?;
        active.remaining -= dt;
        if active.remaining > 0.0 {
            return None;
        }
        let kind = active.kind;
        self.clear_powerup();
        Some(kind)
    }

    fn clear_powerup(&mut self) {
        self.powerup = None;
        self.damage_multiplier = 1.0;
        self.speed_multiplier = 1.0;
        self.rapid_fire = false;
    }

    /// Fire-rate multiplier from the rapid-fire powerup.
    pub fn fire_rate_multiplier(&self) -> f32 {
        if self.rapid_fire {
            RAPID_FIRE_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Ease the field of view toward the stance target plus `fov_punch`,
    /// and decay the landing impact.
    pub fn update_camera(&mut self, dt: f32, zoomed: bool, fov_punch: f32) {
        let target = if zoomed {
            FOV_ZOOMED
        } else if self.sprinting {
            FOV_SPRINT
        } else if self.jumping {
            FOV_JUMP
        } else if !self.on_ground {
            FOV_AIRBORNE
        } else {
            self.config.base_fov
        };
        let rate = if zoomed {
            FOV_ZOOM_LERP_RATE
        } else {
            FOV_LERP_RATE
        };
        self.fov = lerp(self.fov, target + fov_punch, rate * dt);

        self.landing_impact *= LANDING_IMPACT_DECAY;
        if self.landing_impact < 0.001 {
            self.landing_impact = 0.0;
        }
    }

    /// Jump the field of view straight to the zoom state.
    pub fn snap_fov(&mut self, zoomed: bool) {
        self.fov = if zoomed {
            FOV_ZOOMED
        } else {
            self.config.base_fov
        };
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }

    /// Strict collision box: radius on x/z, feet to eye on y.
    pub fn bounds(&self) -> Aabb {
        body_box(self.position, self.config.height, self.config.radius)
    }

    /// Bearing of `point` relative to the view in degrees, in (-180, 180].
    /// Zero is straight ahead, positive is to the left.
    pub fn relative_bearing(&self, point: Vec3) -> f32 {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        let bearing = (-dx).atan2(-dz);
        wrap_angle(bearing - self.yaw).to_degrees()
    }
}

fn body_box(eye: Vec3, height: f32, radius: f32) -> Aabb {
    Aabb::new(
        Vec3::new(eye.x - radius, eye.y - height, eye.z - radius),
        Vec3::new(eye.x + radius, eye.y, eye.z + radius),
    )
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
