//! Simulation constants and tuning parameters.
//!
//! Per-kind tables (weapons, enemy tiers) live in [`crate::config`].

/// Nominal frame rate of the headless runner (Hz).
pub const NOMINAL_FRAME_RATE: u32 = 60;

/// Largest frame delta the simulation will integrate in one step (seconds).
pub const MAX_FRAME_DT: f32 = 0.1;

// --- Arena ---

/// Half-extent of the square arena (meters).
pub const ARENA_HALF_EXTENT: f32 = 30.0;

/// Margin kept between the player and the arena walls.
pub const ARENA_WALL_MARGIN: f32 = 0.5;

/// Distance of the outer spawn ring from the arena center.
pub const SPAWN_RING_DISTANCE: f32 = 25.0;

// --- Player movement ---

/// Eye height above the feet when standing (meters).
pub const PLAYER_HEIGHT: f32 = 1.7;

/// Horizontal half-width of the player collision box.
pub const PLAYER_RADIUS: f32 = 0.4;

pub const WALK_SPEED: f32 = 6.0;
pub const SPRINT_SPEED: f32 = 9.5;

/// Horizontal approach rates toward the input target (1/s).
pub const GROUND_ACCEL: f32 = 12.0;
pub const AIR_ACCEL: f32 = 3.0;

/// Exponential decay rates of horizontal speed with no input (1/s).
pub const GROUND_DECEL: f32 = 10.0;
pub const AIR_DECEL: f32 = 1.0;

pub const MAX_HEALTH: f32 = 100.0;
pub const MAX_ARMOR: f32 = 100.0;
pub const MAX_STAMINA: f32 = 100.0;

/// Stamina spent per second of sprinting.
pub const STAMINA_DRAIN: f32 = 25.0;

/// Stamina recovered per second when not sprinting.
pub const STAMINA_REGEN: f32 = 15.0;

/// Gravity (m/s², applied downward).
pub const GRAVITY: f32 = 20.0;

/// Vertical speed given by a jump (m/s).
pub const JUMP_FORCE: f32 = 7.5;

/// Multiplier applied to upward speed when the jump is released early.
pub const JUMP_CUT_FACTOR: f32 = 0.5;

/// Grace window after leaving the ground where a jump is still honored.
pub const COYOTE_TIME: f32 = 0.12;

/// Window in which an early jump press is remembered.
pub const JUMP_BUFFER_TIME: f32 = 0.12;

/// Tallest ledge the player walks onto without jumping.
pub const STEP_HEIGHT: f32 = 0.45;

/// Minimum fall speed that records a landing impact (m/s).
pub const LANDING_IMPACT_THRESHOLD: f32 = 5.0;

/// Fall speed that maps to a landing impact of 1.0.
pub const LANDING_IMPACT_SCALE: f32 = 20.0;

/// Per-frame decay factor of the landing impact value.
pub const LANDING_IMPACT_DECAY: f32 = 0.8;

// --- Field of view ---

pub const FOV_BASE: f32 = 75.0;
pub const FOV_ZOOMED: f32 = 40.0;
pub const FOV_SPRINT: f32 = 85.0;
pub const FOV_JUMP: f32 = 80.0;
pub const FOV_AIRBORNE: f32 = 78.0;

/// Rate at which the FOV approaches its target (1/s).
pub const FOV_LERP_RATE: f32 = 8.0;

/// Approach rate while zoomed.
pub const FOV_ZOOM_LERP_RATE: f32 = 50.0;

/// Horizontal speed above which the player counts as moving (spread and bob).
pub const MOVING_SPEED_THRESHOLD: f32 = 1.0;

/// Maximum look pitch magnitude (radians).
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2;

// --- Powerups ---

pub const POWERUP_DURATION: f32 = 10.0;
pub const DAMAGE_POWERUP_MULTIPLIER: f32 = 2.0;
pub const SPEED_POWERUP_MULTIPLIER: f32 = 1.5;
pub const RAPID_FIRE_MULTIPLIER: f32 = 2.0;

// --- Combat ---

/// Damage multiplier for head hits.
pub const HEADSHOT_MULTIPLIER: f32 = 2.0;

/// Maximum distance a player shot travels (meters).
pub const PLAYER_SHOT_RANGE: f32 = 200.0;

/// Enemy body hitbox relative to the enemy's ground position.
pub const ENEMY_BODY_MIN: [f32; 3] = [-0.5, 0.0, -0.5];
pub const ENEMY_BODY_MAX: [f32; 3] = [0.5, 1.4, 0.5];

/// Enemy head hitbox relative to the enemy's ground position.
pub const ENEMY_HEAD_MIN: [f32; 3] = [-0.25, 1.4, -0.25];
pub const ENEMY_HEAD_MAX: [f32; 3] = [0.25, 1.9, 0.25];

/// Horizontal radius used when validating enemy moves against obstacles.
pub const ENEMY_RADIUS: f32 = 0.5;

/// Height of the enemy's muzzle above its ground position.
pub const ENEMY_EYE_HEIGHT: f32 = 1.5;

/// Height above the player's feet that enemies aim at.
pub const PLAYER_AIM_HEIGHT: f32 = 0.8;

/// Extra margin around the player box that registers a near miss.
pub const NEAR_MISS_MARGIN: f32 = 0.75;

/// Minimum camera shake after the player is hit.
pub const HIT_CAMERA_SHAKE: f32 = 0.04;

// --- Enemy behavior ---

/// Enemies hold their ground between these two distances.
pub const ENEMY_RETREAT_DISTANCE: f32 = 6.0;
pub const ENEMY_ADVANCE_DISTANCE: f32 = 8.0;

/// Strafe band (exclusive bounds).
pub const ENEMY_STRAFE_MIN_DISTANCE: f32 = 5.0;
pub const ENEMY_STRAFE_MAX_DISTANCE: f32 = 15.0;

/// Seconds between strafe direction flips.
pub const ENEMY_STRAFE_INTERVAL: f32 = 2.0;

/// Weight of the strafe term in the desired direction.
pub const ENEMY_STRAFE_WEIGHT: f32 = 0.3;

/// Retreat speed as a fraction of the tier's speed.
pub const ENEMY_RETREAT_SPEED_FACTOR: f32 = 0.3;

/// Obstacles closer than their width plus this margin repel enemies.
pub const ENEMY_AVOID_MARGIN: f32 = 2.0;

/// Weight of each repulsion term.
pub const ENEMY_AVOID_WEIGHT: f32 = 0.5;

/// Maximum distance at which enemies open fire.
pub const ENEMY_ENGAGE_RANGE: f32 = 25.0;

/// How far short of the target a line-of-sight ray stops.
pub const LOS_END_MARGIN: f32 = 0.5;

/// Ring spin rate (rad/s).
pub const ENEMY_RING_SPIN_RATE: f32 = 2.0;

/// Color a fully damaged enemy tints toward.
pub const ENEMY_DAMAGED_COLOR: u32 = 0x33_33_33;

/// Emissive intensity of a full-health enemy.
pub const ENEMY_MAX_EMISSIVE: f32 = 0.2;

// --- Waves ---

/// Score bonus per wave number on wave clear.
pub const WAVE_CLEAR_BONUS: u32 = 500;

/// Delay between starting a game and the first wave.
pub const FIRST_WAVE_DELAY: f32 = 1.0;

/// Delay between a wave clear and the next wave.
pub const NEXT_WAVE_DELAY: f32 = 3.0;

/// First wave that adds medium-tier enemies.
pub const MEDIUM_TIER_UNLOCK_WAVE: u32 = 3;

/// First wave that adds heavy-tier enemies.
pub const HEAVY_TIER_UNLOCK_WAVE: u32 = 5;

// --- Pickups ---

pub const HEALTH_PICKUP_AMOUNT: f32 = 30.0;
pub const ARMOR_PICKUP_AMOUNT: f32 = 50.0;
pub const AMMO_PICKUP_AMOUNT: u32 = 60;

/// Distance at which a pickup is collected (meters, from the player eye).
pub const PICKUP_COLLECT_RADIUS: f32 = 1.5;

/// Height pickups float at.
pub const PICKUP_HEIGHT: f32 = 0.5;

/// Probability a killed enemy drops a pickup.
pub const ENEMY_DROP_CHANCE: f64 = 0.3;

/// Half-extent of the area wave pickups are scattered in.
pub const PICKUP_SCATTER_EXTENT: f32 = 20.0;

/// Half-extent for the bonus health and powerup pickups.
pub const PICKUP_NEAR_EXTENT: f32 = 10.0;
