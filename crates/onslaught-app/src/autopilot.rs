//! Scripted input source for the headless runner.
//!
//! Reads the previous frame's snapshot and produces the next frame's input:
//! turn toward the nearest enemy, strafe, fire once on target, and keep the
//! weapon fed.

use glam::{Vec2, Vec3};

use onslaught_core::commands::{InputFrame, PlayerCommand};
use onslaught_core::state::{EnemyView, GameStateSnapshot};
use onslaught_core::types::yaw_of;
use onslaught_sim::player::wrap_angle;

/// Largest look rotation the autopilot applies per frame (radians).
const MAX_TURN_PER_FRAME: f32 = 0.15;

/// Aim error below which the autopilot pulls the trigger (radians).
const FIRE_TOLERANCE: f32 = 0.05;

/// Frames between strafe direction flips.
const STRAFE_FLIP_FRAMES: u32 = 90;

/// Height above an enemy's feet the autopilot aims at.
const TARGET_HEIGHT: f32 = 0.9;

/// Beyond this distance the autopilot closes in while strafing.
const CLOSE_IN_DISTANCE: f32 = 12.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frame: u32,
    strafe_dir: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            frame: 0,
            strafe_dir: 1.0,
        }
    }

    /// Input and commands for the next frame, given the last snapshot.
    pub fn next(&mut self, snapshot: &GameStateSnapshot) -> (InputFrame, Vec<PlayerCommand>) {
        self.frame = self.frame.wrapping_add(1);
        if self.frame % STRAFE_FLIP_FRAMES == 0 {
            self.strafe_dir = -self.strafe_dir;
        }

        let commands = self.weapon_commands(snapshot);
        let player = &snapshot.player;
        let Some(target) = nearest_enemy(player.position, &snapshot.enemies) else {
            return (InputFrame::default(), commands);
        };

        let aim_at = target.position + Vec3::Y * TARGET_HEIGHT;
        let (yaw, pitch) = aim_angles(player.position, aim_at);
        let yaw_error = wrap_angle(yaw - player.yaw);
        let pitch_error = pitch - player.pitch;
        let look_delta = Vec2::new(yaw_error, pitch_error)
            .clamp(Vec2::splat(-MAX_TURN_PER_FRAME), Vec2::splat(MAX_TURN_PER_FRAME));

        let on_target = yaw_error.abs() < FIRE_TOLERANCE && pitch_error.abs() < FIRE_TOLERANCE;
        let distance = player.position.distance(aim_at);
        let forward = if distance > CLOSE_IN_DISTANCE { 0.5 } else { 0.0 };

        let input = InputFrame {
            move_intent: Vec2::new(self.strafe_dir, forward),
            fire_held: on_target && snapshot.weapon.magazine > 0 && !snapshot.weapon.reloading,
            look_delta,
            ..Default::default()
        };
        (input, commands)
    }

    /// Reload when dry, move on to the next weapon when out of ammo.
    fn weapon_commands(&self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let weapon = &snapshot.weapon;
        if weapon.magazine > 0 || weapon.reloading {
            return Vec::new();
        }
        if weapon.reserve > 0 {
            vec![PlayerCommand::Reload]
        } else {
            vec![PlayerCommand::ScrollWeapon { delta: 1 }]
        }
    }
}

/// Closest live enemy to `from`.
pub fn nearest_enemy(from: Vec3, enemies: &[EnemyView]) -> Option<&EnemyView> {
    enemies
        .iter()
        .filter(|e| e.health > 0.0)
        .min_by(|a, b| {
            from.distance_squared(a.position)
                .total_cmp(&from.distance_squared(b.position))
        })
}

/// Yaw and pitch that point the view from `eye` at `target`.
pub fn aim_angles(eye: Vec3, target: Vec3) -> (f32, f32) {
    let offset = target - eye;
    let horizontal = Vec2::new(offset.x, offset.z).length();
    (yaw_of(offset), offset.y.atan2(horizontal))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use onslaught_core::enums::GamePhase;
    use onslaught_sim::{SimConfig, SimulationEngine};

    #[test]
    fn test_aim_angles() {
        let eye = Vec3::new(0.0, 1.7, 0.0);
        let (yaw, pitch) = aim_angles(eye, Vec3::new(0.0, 1.7, -10.0));
        assert!(yaw.abs() < 1e-6);
        assert!(pitch.abs() < 1e-6);

        let (yaw, _) = aim_angles(eye, Vec3::new(-10.0, 1.7, 0.0));
        assert!((yaw - FRAC_PI_2).abs() < 1e-5);

        let (_, pitch) = aim_angles(eye, Vec3::new(0.0, -8.3, -10.0));
        assert!((pitch + std::f32::consts::FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn test_idle_without_enemies() {
        let mut autopilot = Autopilot::new();
        let (input, commands) = autopilot.next(&GameStateSnapshot::default());
        assert!(!input.fire_held);
        assert_eq!(input.look_delta, Vec2::ZERO);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_autopilot_engages_first_wave() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut autopilot = Autopilot::new();
        engine.queue_command(PlayerCommand::StartGame);

        let mut snapshot = engine.step(1.0 / 60.0, &InputFrame::default());
        for _ in 0..900 {
            let (input, commands) = autopilot.next(&snapshot);
            engine.queue_commands(commands);
            snapshot = engine.step(1.0 / 60.0, &input);
            if snapshot.phase == GamePhase::GameOver {
                break;
            }
        }

        assert!(snapshot.session.shots_fired > 0, "Autopilot never fired");
        assert!(snapshot.session.shots_hit > 0, "Autopilot never hit");
    }
}
