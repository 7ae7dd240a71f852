//! Tuning tables for the player, each weapon kind and each enemy tier.
//!
//! Weapon and enemy behavior is written once and parameterized by these
//! tables. Defaults are built in; a full table can be loaded from JSON with
//! [`GameConfig::from_json`], which validates it before returning.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyTier, WeaponKind};
use crate::error::ConfigError;

/// Player movement and resource tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Eye height above the feet.
    pub height: f32,
    pub radius: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub ground_accel: f32,
    pub air_accel: f32,
    pub ground_decel: f32,
    pub air_decel: f32,
    pub jump_force: f32,
    pub jump_cut_factor: f32,
    pub gravity: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub step_height: f32,
    pub max_health: f32,
    pub max_armor: f32,
    pub max_stamina: f32,
    pub stamina_drain: f32,
    pub stamina_regen: f32,
    pub base_fov: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            height: PLAYER_HEIGHT,
            radius: PLAYER_RADIUS,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            ground_accel: GROUND_ACCEL,
            air_accel: AIR_ACCEL,
            ground_decel: GROUND_DECEL,
            air_decel: AIR_DECEL,
            jump_force: JUMP_FORCE,
            jump_cut_factor: JUMP_CUT_FACTOR,
            gravity: GRAVITY,
            coyote_time: COYOTE_TIME,
            jump_buffer_time: JUMP_BUFFER_TIME,
            step_height: STEP_HEIGHT,
            max_health: MAX_HEALTH,
            max_armor: MAX_ARMOR,
            max_stamina: MAX_STAMINA,
            stamina_drain: STAMINA_DRAIN,
            stamina_regen: STAMINA_REGEN,
            base_fov: FOV_BASE,
        }
    }
}

/// Shot spread and bloom, in direction-offset units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadConfig {
    pub base: f32,
    pub air_multiplier: f32,
    pub sprint_multiplier: f32,
    pub move_multiplier: f32,
    pub bloom_per_shot: f32,
    pub bloom_max: f32,
    /// Bloom removed per second.
    pub bloom_recovery: f32,
}

/// Scripted per-shot aim offsets during sustained fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprayPattern {
    pub enabled: bool,
    /// Upward offset per shot index.
    pub pitch: Vec<f32>,
    /// Sideways offset per shot index. Missing entries count as zero.
    pub yaw: Vec<f32>,
    pub scale: f32,
    /// Idle time after which the burst counter restarts.
    pub reset_time: f32,
}

impl SprayPattern {
    /// Pitch/yaw offset for a shot index, clamped to the last entry.
    pub fn offset(&self, shot_index: u32) -> (f32, f32) {
        if !self.enabled || self.pitch.is_empty() {
            return (0.0, 0.0);
        }
        let idx = (shot_index as usize).min(self.pitch.len() - 1);
        let pitch = self.pitch[idx] * self.scale;
        let yaw = self.yaw.get(idx).copied().unwrap_or(0.0) * self.scale;
        (pitch, yaw)
    }
}

/// View recoil and weapon kick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoilConfig {
    pub pitch_amount: f32,
    pub pitch_random: f32,
    pub yaw_amount: f32,
    pub yaw_random: f32,
    pub max_pitch: f32,
    pub max_yaw: f32,
    /// Delay after a shot before recoil starts recovering.
    pub recovery_delay: f32,
    pub recovery_rate: f32,
    /// Weapon model kick-back distance.
    pub kick_back: f32,
    /// Weapon model kick rotation (degrees).
    pub kick_rotation_deg: f32,
}

/// Screen feedback primed by each shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenEffectsConfig {
    pub fov_punch: f32,
    pub max_fov_punch: f32,
    pub fov_punch_recovery: f32,
    pub shake_intensity: f32,
    /// Per-frame multiplicative decay.
    pub shake_decay: f32,
    pub chroma_intensity: f32,
    pub max_chroma: f32,
    /// Per-frame multiplicative decay.
    pub chroma_decay: f32,
}

/// Cosmetic weapon handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlingConfig {
    pub sway_amount: f32,
    pub sway_recovery: f32,
    pub sprint_blend_speed: f32,
    pub reload_blend_speed: f32,
    pub bob_influence: f32,
}

/// Full tuning for one weapon kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub kind: WeaponKind,
    /// Damage per pellet before multipliers.
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub magazine_size: u32,
    /// Reserve ammo at the start of a session.
    pub reserve_ammo: u32,
    pub reload_time: f32,
    /// Shot directions produced per trigger pull.
    pub pellets: u32,
    pub zoomable: bool,
    pub spread: SpreadConfig,
    pub spray: SprayPattern,
    pub recoil: RecoilConfig,
    pub screen: ScreenEffectsConfig,
    pub handling: HandlingConfig,
}

/// False for zero, negative and NaN.
fn positive(value: f32) -> bool {
    value > 0.0
}

/// Rifle-like baseline that the per-kind tables adjust.
fn baseline(kind: WeaponKind) -> WeaponConfig {
    WeaponConfig {
        kind,
        damage: 25.0,
        fire_rate: 10.0,
        magazine_size: 30,
        reserve_ammo: 90,
        reload_time: 2.5,
        pellets: 1,
        zoomable: false,
        spread: SpreadConfig {
            base: 0.02,
            air_multiplier: 2.0,
            sprint_multiplier: 1.5,
            move_multiplier: 1.2,
            bloom_per_shot: 0.008,
            bloom_max: 0.06,
            bloom_recovery: 0.15,
        },
        spray: SprayPattern {
            enabled: true,
            pitch: vec![0.0, 1.0, 1.8, 2.4, 2.9, 3.2, 3.4, 3.5, 3.5, 3.4],
            yaw: vec![0.0, 0.1, -0.2, 0.4, 0.6, 0.3, -0.4, -0.8, -0.6, 0.2],
            scale: 0.01,
            reset_time: 0.3,
        },
        recoil: RecoilConfig {
            pitch_amount: 0.012,
            pitch_random: 0.004,
            yaw_amount: 0.006,
            yaw_random: 0.004,
            max_pitch: 0.5,
            max_yaw: 0.5,
            recovery_delay: 0.1,
            recovery_rate: 4.0,
            kick_back: 0.06,
            kick_rotation_deg: 4.0,
        },
        screen: ScreenEffectsConfig {
            fov_punch: 1.0,
            max_fov_punch: 4.0,
            fov_punch_recovery: 20.0,
            shake_intensity: 0.01,
            shake_decay: 0.85,
            chroma_intensity: 0.002,
            max_chroma: 0.01,
            chroma_decay: 0.9,
        },
        handling: HandlingConfig {
            sway_amount: 0.0015,
            sway_recovery: 8.0,
            sprint_blend_speed: 8.0,
            reload_blend_speed: 6.0,
            bob_influence: 1.0,
        },
    }
}

impl WeaponConfig {
    /// Built-in table for a weapon kind.
    pub fn for_kind(kind: WeaponKind) -> Self {
        let mut cfg = baseline(kind);
        match kind {
            WeaponKind::Ak47 => {}
            WeaponKind::M4 => {
                cfg.damage = 22.0;
                cfg.fire_rate = 11.0;
                cfg.reload_time = 2.2;
                cfg.spread.base = 0.015;
                cfg.spray.scale = 0.008;
                cfg.recoil.pitch_amount = 0.009;
            }
            WeaponKind::Scar => {
                cfg.damage = 30.0;
                cfg.fire_rate = 8.0;
                cfg.magazine_size = 20;
                cfg.reserve_ammo = 60;
                cfg.reload_time = 2.6;
                cfg.spray.scale = 0.012;
                cfg.recoil.pitch_amount = 0.016;
            }
            WeaponKind::Lmg => {
                cfg.damage = 20.0;
                cfg.fire_rate = 12.0;
                cfg.magazine_size = 100;
                cfg.reserve_ammo = 200;
                cfg.reload_time = 4.5;
                cfg.spread.base = 0.03;
                cfg.spread.bloom_max = 0.09;
                cfg.spray.scale = 0.009;
                cfg.handling.sway_amount = 0.0025;
            }
            WeaponKind::Tec9 => {
                cfg.damage = 15.0;
                cfg.fire_rate = 14.0;
                cfg.magazine_size = 32;
                cfg.reserve_ammo = 96;
                cfg.reload_time = 1.8;
                cfg.spread.base = 0.035;
                cfg.spray.scale = 0.006;
                cfg.recoil.pitch_amount = 0.007;
            }
            WeaponKind::Pistol => {
                cfg.damage = 20.0;
                cfg.fire_rate = 5.0;
                cfg.magazine_size = 12;
                cfg.reserve_ammo = 48;
                cfg.reload_time = 1.5;
                cfg.spread.base = 0.015;
                cfg.spread.bloom_per_shot = 0.012;
                cfg.spray.enabled = false;
                cfg.recoil.pitch_amount = 0.02;
                cfg.screen.fov_punch = 0.6;
            }
            WeaponKind::Shotgun => {
                cfg.damage = 12.0;
                cfg.fire_rate = 1.2;
                cfg.magazine_size = 8;
                cfg.reserve_ammo = 32;
                cfg.reload_time = 3.0;
                cfg.pellets = 8;
                cfg.spread.base = 0.12;
                cfg.spread.bloom_per_shot = 0.02;
                cfg.spread.bloom_max = 0.05;
                cfg.spray.enabled = false;
                cfg.recoil.pitch_amount = 0.05;
                cfg.recoil.kick_back = 0.15;
                cfg.recoil.kick_rotation_deg = 10.0;
                cfg.screen.fov_punch = 3.0;
                cfg.screen.shake_intensity = 0.03;
                cfg.screen.chroma_intensity = 0.006;
            }
            WeaponKind::Sniper => {
                cfg.damage = 80.0;
                cfg.fire_rate = 1.0;
                cfg.magazine_size = 5;
                cfg.reserve_ammo = 20;
                cfg.reload_time = 3.0;
                cfg.zoomable = true;
                cfg.spread.base = 0.002;
                cfg.spread.air_multiplier = 10.0;
                cfg.spread.sprint_multiplier = 8.0;
                cfg.spread.move_multiplier = 4.0;
                cfg.spread.bloom_per_shot = 0.03;
                cfg.spray.enabled = false;
                cfg.recoil.pitch_amount = 0.06;
                cfg.recoil.kick_back = 0.2;
                cfg.recoil.kick_rotation_deg = 8.0;
                cfg.screen.fov_punch = 2.5;
                cfg.screen.shake_intensity = 0.025;
            }
            WeaponKind::Awp => {
                cfg.damage = 115.0;
                cfg.fire_rate = 0.7;
                cfg.magazine_size = 5;
                cfg.reserve_ammo = 15;
                cfg.reload_time = 3.7;
                cfg.zoomable = true;
                cfg.spread.base = 0.001;
                cfg.spread.air_multiplier = 12.0;
                cfg.spread.sprint_multiplier = 10.0;
                cfg.spread.move_multiplier = 5.0;
                cfg.spread.bloom_per_shot = 0.04;
                cfg.spray.enabled = false;
                cfg.recoil.pitch_amount = 0.08;
                cfg.recoil.kick_back = 0.25;
                cfg.recoil.kick_rotation_deg = 12.0;
                cfg.screen.fov_punch = 3.5;
                cfg.screen.shake_intensity = 0.035;
            }
        }
        cfg
    }

    /// Minimum seconds between shots, given a fire-rate multiplier.
    pub fn shot_interval(&self, rate_multiplier: f32) -> f32 {
        1.0 / (self.fire_rate * rate_multiplier)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason: &str| {
            Err(ConfigError::InvalidWeapon {
                kind: self.kind,
                reason: reason.to_string(),
            })
        };
        if !positive(self.fire_rate) {
            return fail("fire_rate must be positive");
        }
        if self.magazine_size == 0 {
            return fail("magazine_size must be at least 1");
        }
        if self.pellets == 0 {
            return fail("pellets must be at least 1");
        }
        if self.damage < 0.0 || self.reload_time < 0.0 {
            return fail("damage and reload_time must not be negative");
        }
        if self.spread.base < 0.0 || self.spread.bloom_max < 0.0 || self.spread.bloom_recovery < 0.0
        {
            return fail("spread values must not be negative");
        }
        if self.spray.enabled && self.spray.pitch.is_empty() {
            return fail("enabled spray pattern needs at least one entry");
        }
        if !(0.0..=1.0).contains(&self.screen.shake_decay)
            || !(0.0..=1.0).contains(&self.screen.chroma_decay)
        {
            return fail("per-frame decay factors must be within [0, 1]");
        }
        Ok(())
    }
}

/// Stat block for an enemy tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub tier: EnemyTier,
    pub health: f32,
    /// Movement speed (m/s).
    pub speed: f32,
    /// Damage per hit on the player.
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Aim error scale. Larger is less accurate.
    pub accuracy: f32,
    /// Score awarded on kill.
    pub score: u32,
    /// Base body color, 0xRRGGBB.
    pub color: u32,
    /// Weapon sound the enemy's shots are reported with.
    pub weapon: WeaponKind,
}

impl EnemyConfig {
    /// Built-in stat block for a tier.
    pub fn for_tier(tier: EnemyTier) -> Self {
        match tier {
            EnemyTier::Light => Self {
                tier,
                health: 100.0,
                speed: 3.5,
                damage: 8.0,
                fire_rate: 0.8,
                accuracy: 0.15,
                score: 100,
                color: 0xff_44_44,
                weapon: WeaponKind::Pistol,
            },
            EnemyTier::Medium => Self {
                tier,
                health: 150.0,
                speed: 3.0,
                damage: 12.0,
                fire_rate: 1.2,
                accuracy: 0.1,
                score: 200,
                color: 0xff_aa_00,
                weapon: WeaponKind::Ak47,
            },
            EnemyTier::Heavy => Self {
                tier,
                health: 300.0,
                speed: 2.0,
                damage: 25.0,
                fire_rate: 0.5,
                accuracy: 0.05,
                score: 400,
                color: 0x88_00_ff,
                weapon: WeaponKind::Awp,
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason: &str| {
            Err(ConfigError::InvalidEnemy {
                tier: self.tier,
                reason: reason.to_string(),
            })
        };
        if !positive(self.health) {
            return fail("health must be positive");
        }
        if !positive(self.fire_rate) {
            return fail("fire_rate must be positive");
        }
        if self.speed < 0.0 || self.damage < 0.0 || self.accuracy < 0.0 {
            return fail("speed, damage and accuracy must not be negative");
        }
        Ok(())
    }
}

/// Complete tuning set for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player: PlayerConfig,
    /// One entry per weapon kind, in selection order.
    pub weapons: [WeaponConfig; 9],
    /// Light, medium, heavy.
    pub enemies: [EnemyConfig; 3],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            weapons: WeaponKind::ALL.map(WeaponConfig::for_kind),
            enemies: [EnemyTier::Light, EnemyTier::Medium, EnemyTier::Heavy]
                .map(EnemyConfig::for_tier),
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn weapon(&self, kind: WeaponKind) -> &WeaponConfig {
        &self.weapons[kind.index()]
    }

    pub fn enemy(&self, tier: EnemyTier) -> &EnemyConfig {
        let idx = match tier {
            EnemyTier::Light => 0,
            EnemyTier::Medium => 1,
            EnemyTier::Heavy => 2,
        };
        &self.enemies[idx]
    }

    /// Check every table for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        if !positive(p.height) || !positive(p.radius) {
            return Err(ConfigError::InvalidPlayer(
                "height and radius must be positive".into(),
            ));
        }
        if !positive(p.max_health) || p.max_armor < 0.0 || p.max_stamina < 0.0 {
            return Err(ConfigError::InvalidPlayer(
                "resource maxima must be positive".into(),
            ));
        }
        if p.gravity < 0.0 || p.step_height < 0.0 {
            return Err(ConfigError::InvalidPlayer(
                "gravity and step_height must not be negative".into(),
            ));
        }

        for (slot, weapon) in self.weapons.iter().enumerate() {
            if weapon.kind.index() != slot {
                return Err(ConfigError::TableOrder {
                    table: "weapons",
                    index: slot,
                });
            }
            weapon.validate()?;
        }

        let tiers = [EnemyTier::Light, EnemyTier::Medium, EnemyTier::Heavy];
        for (slot, enemy) in self.enemies.iter().enumerate() {
            if enemy.tier != tiers[slot] {
                return Err(ConfigError::TableOrder {
                    table: "enemies",
                    index: slot,
                });
            }
            enemy.validate()?;
        }
        Ok(())
    }
}
