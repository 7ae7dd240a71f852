//! Line-of-sight and aiming.

use glam::Vec3;
use rand::Rng;

use onslaught_core::constants::{ENEMY_ENGAGE_RANGE, LOS_END_MARGIN};
use onslaught_core::types::{Obstacle, Ray};

/// True when no obstacle blocks the segment from `from` to `to`.
///
/// The test stops `LOS_END_MARGIN` short of `to`, so geometry the target is
/// standing against does not count as cover.
pub fn has_line_of_sight(from: Vec3, to: Vec3, obstacles: &[Obstacle]) -> bool {
    let offset = to - from;
    let distance = offset.length();
    if distance <= LOS_END_MARGIN {
        return true;
    }
    let ray = Ray::new(from, offset);
    let reach = distance - LOS_END_MARGIN;
    !obstacles
        .iter()
        .any(|o| ray.intersect_aabb(&o.bounds, reach).is_some())
}

/// Direction of an aimed enemy shot with random error.
///
/// The error is a uniform offset in `[-0.5, 0.5) * accuracy` along the
/// shooter's right and up axes, growing by up to half again at the edge of
/// engagement range.
pub fn aim_direction<R: Rng>(
    from: Vec3,
    target: Vec3,
    accuracy: f32,
    rng: &mut R,
) -> Vec3 {
    let offset = target - from;
    let forward = offset.try_normalize().unwrap_or(Vec3::NEG_Z);
    let falloff = 1.0 + 0.5 * (offset.length() / ENEMY_ENGAGE_RANGE).min(1.0);
    let error = accuracy * falloff;

    let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
    let up = right.cross(forward);

    let dx = (rng.gen::<f32>() - 0.5) * error;
    let dy = (rng.gen::<f32>() - 0.5) * error;
    (forward + right * dx + up * dy).normalize()
}

/// Random initial strafe direction, +1 or -1.
pub fn initial_strafe_dir<R: Rng>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
