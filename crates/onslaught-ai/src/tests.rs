#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use onslaught_core::config::EnemyConfig;
    use onslaught_core::constants::*;
    use onslaught_core::enums::{EnemyTier, Material};
    use onslaught_core::types::{Aabb, Obstacle};

    use crate::appearance::{emissive_for_health, tint_for_health};
    use crate::fsm::{aim_point, evaluate, is_blocked, EnemyContext, EnemyStance, EnemyUpdate};
    use crate::perception::{aim_direction, has_line_of_sight, initial_strafe_dir};
    use crate::profiles::{get_profile, BehaviorProfile};

    const DT: f32 = 0.1;

    fn grunt() -> BehaviorProfile {
        get_profile(&EnemyConfig::for_tier(EnemyTier::Light))
    }

    fn player_at(x: f32, z: f32) -> Vec3 {
        Vec3::new(x, PLAYER_HEIGHT, z)
    }

    fn wall(min: [f32; 3], max: [f32; 3]) -> Obstacle {
        Obstacle::new(
            Aabb::new(Vec3::from_array(min), Vec3::from_array(max)),
            Material::Concrete,
        )
    }

    fn step(
        profile: &BehaviorProfile,
        position: Vec3,
        player: Vec3,
        fire_cooldown: f32,
        obstacles: &[Obstacle],
    ) -> EnemyUpdate {
        evaluate(&EnemyContext {
            profile,
            position,
            player,
            player_height: PLAYER_HEIGHT,
            strafe_dir: 1.0,
            strafe_timer: 0.0,
            fire_cooldown,
            obstacles,
            dt: DT,
        })
    }

    // ---- Movement bands ----

    #[test]
    fn test_far_enemy_advances() {
        let profile = grunt();
        let update = step(&profile, Vec3::new(0.0, 0.0, 20.0), player_at(0.0, 0.0), 1.0, &[]);
        assert_eq!(update.stance, EnemyStance::Advance);
        assert!((update.position.z - (20.0 - profile.speed * DT)).abs() < 1e-5);
        assert_eq!(update.position.x, 0.0);
    }

    #[test]
    fn test_close_enemy_retreats_slowly() {
        let profile = grunt();
        let update = step(&profile, Vec3::new(0.0, 0.0, 3.0), player_at(0.0, 0.0), 1.0, &[]);
        assert_eq!(update.stance, EnemyStance::Retreat);
        let expected = 3.0 + profile.speed * ENEMY_RETREAT_SPEED_FACTOR * DT;
        assert!((update.position.z - expected).abs() < 1e-5);
    }

    #[test]
    fn test_mid_band_enemy_holds() {
        let profile = grunt();
        let start = Vec3::new(0.0, 0.0, 7.0);
        let update = step(&profile, start, player_at(0.0, 0.0), 1.0, &[]);
        assert_eq!(update.stance, EnemyStance::Hold);
        assert_eq!(update.position, start);
    }

    #[test]
    fn test_mid_range_advance_strafes_sideways() {
        let profile = grunt();
        let update = step(&profile, Vec3::new(0.0, 0.0, 10.0), player_at(0.0, 0.0), 1.0, &[]);
        assert_eq!(update.stance, EnemyStance::Advance);
        assert!(update.position.x > 0.0, "strafe term should push along +x");
        assert!(update.position.z < 10.0);
    }

    #[test]
    fn test_strafe_direction_flips_after_interval() {
        let profile = grunt();
        let update = evaluate(&EnemyContext {
            profile: &profile,
            position: Vec3::new(0.0, 0.0, 10.0),
            player: player_at(0.0, 0.0),
            player_height: PLAYER_HEIGHT,
            strafe_dir: 1.0,
            strafe_timer: ENEMY_STRAFE_INTERVAL - 0.05,
            fire_cooldown: 1.0,
            obstacles: &[],
            dt: DT,
        });
        assert_eq!(update.strafe_dir, -1.0);
        assert_eq!(update.strafe_timer, 0.0);
    }

    #[test]
    fn test_enemy_faces_player() {
        let profile = grunt();
        // Player due -X of the enemy: yaw of +90 degrees.
        let update = step(&profile, Vec3::new(10.0, 0.0, 0.0), player_at(0.0, 0.0), 1.0, &[]);
        assert!((update.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_move_into_obstacle_is_rejected() {
        let profile = grunt();
        let obstacles = [wall([-2.0, 0.0, 8.0], [2.0, 2.0, 9.2])];
        let start = Vec3::new(0.0, 0.0, 10.0);
        let update = step(&profile, start, player_at(0.0, -10.0), 1.0, &obstacles);
        assert!(update.move_blocked);
        assert_eq!(update.position, start);
    }

    #[test]
    fn test_enemy_steers_away_from_nearby_obstacle() {
        let profile = grunt();
        // Obstacle off to the +x side of the path.
        let obstacles = [wall([1.0, 0.0, 17.0], [2.0, 2.0, 19.0])];
        let update = step(&profile, Vec3::new(0.0, 0.0, 20.0), player_at(0.0, 0.0), 1.0, &obstacles);
        assert!(update.position.x < 0.0);
    }

    // ---- Firing ----

    #[test]
    fn test_fires_when_in_range_and_clear() {
        let profile = grunt();
        let update = step(&profile, Vec3::new(0.0, 0.0, 20.0), player_at(0.0, 0.0), 0.0, &[]);
        assert!(update.fire);
        assert!((update.fire_cooldown - profile.fire_interval).abs() < 1e-6);
    }

    #[test]
    fn test_no_fire_out_of_range() {
        let profile = grunt();
        let update = step(&profile, Vec3::new(0.0, 0.0, 28.0), player_at(0.0, 0.0), 0.0, &[]);
        assert!(!update.fire);
    }

    #[test]
    fn test_no_fire_while_cooling_down() {
        let profile = grunt();
        let update = step(&profile, Vec3::new(0.0, 0.0, 20.0), player_at(0.0, 0.0), 0.5, &[]);
        assert!(!update.fire);
        assert!((update.fire_cooldown - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_no_fire_without_line_of_sight() {
        let profile = grunt();
        let obstacles = [wall([-3.0, 0.0, 9.0], [3.0, 3.0, 10.0])];
        let update = step(&profile, Vec3::new(0.0, 0.0, 20.0), player_at(0.0, 0.0), 0.0, &obstacles);
        assert!(!update.fire);
        assert_eq!(update.fire_cooldown, 0.0);
    }

    #[test]
    fn test_line_of_sight_ignores_cover_at_target() {
        let from = Vec3::new(0.0, 1.5, 20.0);
        let to = Vec3::new(0.0, 0.8, 0.0);
        let hugging = [wall([-1.0, 0.0, 0.05], [1.0, 2.0, 0.35])];
        assert!(has_line_of_sight(from, to, &hugging));

        let blocking = [wall([-1.0, 0.0, 5.0], [1.0, 2.0, 6.0])];
        assert!(!has_line_of_sight(from, to, &blocking));
        assert!(has_line_of_sight(from, to, &[]));
    }

    // ---- Aim ----

    #[test]
    fn test_perfect_accuracy_aims_straight() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let from = Vec3::new(0.0, 1.5, 10.0);
        let target = Vec3::new(0.0, 0.8, 0.0);
        let dir = aim_direction(from, target, 0.0, &mut rng);
        let expected = (target - from).normalize();
        assert!((dir - expected).length() < 1e-5);
    }

    #[test]
    fn test_aim_error_is_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let from = Vec3::new(0.0, 1.5, 10.0);
        let target = Vec3::new(0.0, 0.8, 0.0);
        let expected = (target - from).normalize();
        for _ in 0..200 {
            let dir = aim_direction(from, target, 0.15, &mut rng);
            assert!((dir.length() - 1.0).abs() < 1e-4);
            assert!(dir.dot(expected) > 0.99);
        }
    }

    #[test]
    fn test_aim_point_stays_on_body() {
        let tall = aim_point(player_at(3.0, -2.0), PLAYER_HEIGHT);
        assert_eq!(tall, Vec3::new(3.0, PLAYER_AIM_HEIGHT, -2.0));

        // A crouch-height player is aimed at mid-body, above the feet.
        let eye = Vec3::new(0.0, 0.6, 0.0);
        let short = aim_point(eye, 0.6);
        assert!(short.y > 0.0 && short.y < eye.y);
        assert!((short.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_short_player_in_view_draws_fire() {
        let profile = grunt();
        let eye = Vec3::new(0.0, 0.6, 0.0);
        // Low enough to clear a shot at the body, high enough to block one
        // aimed below the feet.
        let low_wall = [wall([-3.0, 0.0, 2.0], [3.0, 0.35, 3.0])];
        let update = evaluate(&EnemyContext {
            profile: &profile,
            position: Vec3::new(0.0, 0.0, 20.0),
            player: eye,
            player_height: 0.6,
            strafe_dir: 1.0,
            strafe_timer: 0.0,
            fire_cooldown: 0.0,
            obstacles: &low_wall,
            dt: DT,
        });
        assert!(update.fire);
    }

    #[test]
    fn test_initial_strafe_dir_is_unit_sign() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = [false, false];
        for _ in 0..64 {
            let d = initial_strafe_dir(&mut rng);
            assert!(d == 1.0 || d == -1.0);
            seen[(d > 0.0) as usize] = true;
        }
        assert!(seen[0] && seen[1]);
    }

    // ---- Appearance ----

    #[test]
    fn test_tint_blends_toward_damaged_color() {
        assert_eq!(tint_for_health(0xff4444, 1.0), 0xff4444);
        assert_eq!(tint_for_health(0xff4444, 0.0), ENEMY_DAMAGED_COLOR);
        let half = tint_for_health(0xff4444, 0.5);
        let red = (half >> 16) & 0xff;
        assert!(red > 0x33 && red < 0xff);
    }

    #[test]
    fn test_emissive_scales_with_health() {
        assert_eq!(emissive_for_health(1.0), ENEMY_MAX_EMISSIVE);
        assert_eq!(emissive_for_health(0.0), 0.0);
        assert_eq!(emissive_for_health(-0.5), 0.0);
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn prop_enemy_never_enters_obstacle(
            start_x in -20.0f32..20.0,
            start_z in -20.0f32..20.0,
            player_x in -25.0f32..25.0,
            player_z in -25.0f32..25.0,
        ) {
            let obstacles = [
                wall([-2.0, 0.0, -2.0], [2.0, 2.0, 2.0]),
                wall([6.0, 0.0, -8.0], [7.0, 3.0, 8.0]),
            ];
            let start = Vec3::new(start_x, 0.0, start_z);
            prop_assume!(!is_blocked(start, &obstacles));

            let profile = grunt();
            let player = player_at(player_x, player_z);
            let mut position = start;
            let mut strafe_dir = 1.0;
            let mut strafe_timer = 0.0;
            for _ in 0..120 {
                let update = evaluate(&EnemyContext {
                    profile: &profile,
                    position,
                    player,
                    player_height: PLAYER_HEIGHT,
                    strafe_dir,
                    strafe_timer,
                    fire_cooldown: 1.0,
                    obstacles: &obstacles,
                    dt: 0.05,
                });
                position = update.position;
                strafe_dir = update.strafe_dir;
                strafe_timer = update.strafe_timer;
                prop_assert!(!is_blocked(position, &obstacles));
            }
        }
    }
}
