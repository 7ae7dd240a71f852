//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{ENEMY_BODY_MAX, ENEMY_BODY_MIN, ENEMY_HEAD_MAX, ENEMY_HEAD_MIN};
use crate::enums::Material;

/// Axis-aligned bounding box in world space (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with full extents `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Same box shifted by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Grow the box by `horizontal` on x/z and `vertical` on y, on both sides.
    pub fn expanded(&self, horizontal: f32, vertical: f32) -> Self {
        let grow = Vec3::new(horizontal, vertical, horizontal);
        Self {
            min: self.min - grow,
            max: self.max + grow,
        }
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Strict overlap test. Boxes that only touch on a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Squared distance from a point to the closest point of the box.
    pub fn distance_squared_to_point(&self, p: Vec3) -> f32 {
        let closest = p.clamp(self.min, self.max);
        closest.distance_squared(p)
    }
}

/// Sphere used for proximity queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        aabb.distance_squared_to_point(self.center) <= self.radius * self.radius
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }
}

/// Result of a ray intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance along the ray to the entry point.
    pub distance: f32,
    pub point: Vec3,
    /// Outward surface normal at the entry face.
    pub normal: Vec3,
}

/// Half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. A zero direction falls back to -Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Slab-method intersection against an AABB, limited to `max_distance`.
    ///
    /// A ray starting inside the box reports distance 0 at its origin.
    pub fn intersect_aabb(&self, aabb: &Aabb, max_distance: f32) -> Option<RayHit> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            match slab_interval(origin, dir, lo, hi) {
                Some((near, far, near_sign)) => {
                    if near > t_min {
                        t_min = near;
                        normal = Vec3::ZERO;
                        normal[axis] = near_sign;
                    }
                    t_max = t_max.min(far);
                    if t_min > t_max {
                        return None;
                    }
                }
                None => return None,
            }
        }

        if normal == Vec3::ZERO {
            // Origin inside the box: report the face opposite the ray.
            normal = -self.direction;
        }

        Some(RayHit {
            distance: t_min,
            point: self.at(t_min),
            normal,
        })
    }

    /// Intersection with the horizontal plane `y = height`, front-facing only.
    pub fn intersect_ground(&self, height: f32, max_distance: f32) -> Option<RayHit> {
        if self.direction.y >= 0.0 || self.origin.y < height {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        if !(0.0..=max_distance).contains(&t) {
            return None;
        }
        Some(RayHit {
            distance: t,
            point: self.at(t),
            normal: Vec3::Y,
        })
    }
}

/// Entry/exit parameters of a ray against one axis slab, plus the sign of the
/// entry face normal on that axis. `None` when the ray is parallel and outside.
fn slab_interval(origin: f32, dir: f32, lo: f32, hi: f32) -> Option<(f32, f32, f32)> {
    if dir.abs() < 1e-8 {
        if origin < lo || origin > hi {
            return None;
        }
        return Some((f32::NEG_INFINITY, f32::INFINITY, 0.0));
    }
    let inv = 1.0 / dir;
    let t0 = (lo - origin) * inv;
    let t1 = (hi - origin) * inv;
    if t0 <= t1 {
        Some((t0, t1, -1.0))
    } else {
        Some((t1, t0, 1.0))
    }
}

/// Static box obstacle in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Aabb,
    /// Surface tag consumed by impact feedback only.
    pub material: Material,
}

impl Obstacle {
    pub fn new(bounds: Aabb, material: Material) -> Self {
        Self { bounds, material }
    }
}

/// Simulation time tracking. Advanced by the measured frame delta.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames.
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of length `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Linear interpolation with the blend factor clamped to [0, 1].
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Yaw (radians) of a direction projected onto the ground plane.
/// Zero faces -Z; positive yaw turns toward -X.
pub fn yaw_of(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}

/// Forward unit vector for a pitch/yaw pair, -Z forward at zero.
pub fn forward_from(pitch: f32, yaw: f32) -> Vec3 {
    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();
    Vec3::new(-sy * cp, sp, -cy * cp)
}

/// Body hitbox of an enemy standing at `pos`.
pub fn enemy_body_box(pos: Vec3) -> Aabb {
    Aabb::new(
        pos + Vec3::from_array(ENEMY_BODY_MIN),
        pos + Vec3::from_array(ENEMY_BODY_MAX),
    )
}

/// Head hitbox of an enemy standing at `pos`.
pub fn enemy_head_box(pos: Vec3) -> Aabb {
    Aabb::new(
        pos + Vec3::from_array(ENEMY_HEAD_MIN),
        pos + Vec3::from_array(ENEMY_HEAD_MAX),
    )
}
