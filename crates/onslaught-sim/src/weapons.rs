//! Weapon system: per-kind ammo slots and the Ready / Firing / Reloading
//! state machine, with an orthogonal zoom flag.
//!
//! All weapon kinds share this code and differ only by their
//! [`WeaponConfig`] table. Screen and model feedback accumulators live here
//! as well, since firing primes them and `update` decays them.

use glam::{Vec2, Vec3};
use rand::Rng;
use tracing::trace;

use onslaught_core::config::{SpreadConfig, WeaponConfig};
use onslaught_core::constants::MOVING_SPEED_THRESHOLD;
use onslaught_core::enums::WeaponKind;

const MICRO_SHAKE_TIME: f32 = 0.1;
const KICK_RECOVERY_RATE: f32 = 5.0;
const CHROMA_EPSILON: f32 = 1e-4;
const SHAKE_EPSILON: f32 = 1e-4;

/// Stored ammunition of one weapon kind. Persists across switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmmoSlot {
    pub magazine: u32,
    pub reserve: u32,
}

/// A reload in flight, tagged with the weapon and round it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingReload {
    pub weapon: WeaponKind,
    pub round: u32,
    pub remaining: f32,
}

/// Aim frame and shooter stance for a trigger pull.
#[derive(Debug, Clone, Copy)]
pub struct ShotContext {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub on_ground: bool,
    pub sprinting: bool,
    pub horizontal_speed: f32,
    pub rate_multiplier: f32,
}

/// Shot directions produced by one trigger pull.
#[derive(Debug, Clone, PartialEq)]
pub struct Volley {
    pub weapon: WeaponKind,
    pub directions: Vec<Vec3>,
}

/// Result of a completed reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadFinished {
    pub weapon: WeaponKind,
    pub magazine: u32,
    pub reserve: u32,
}

/// Per-frame inputs to the cosmetic handling state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlingInput {
    pub look_delta: Vec2,
    pub sprinting: bool,
    pub bob_time: f32,
}

#[derive(Debug, Clone)]
pub struct WeaponSystem {
    configs: [WeaponConfig; 9],
    slots: [AmmoSlot; 9],
    current: WeaponKind,
    reload: Option<PendingReload>,
    zoomed: bool,
    time_since_last_shot: f32,

    // --- Spread ---
    pub bloom: f32,
    pub shots_in_burst: u32,

    // --- Recoil ---
    pub recoil_pitch: f32,
    pub recoil_yaw: f32,
    recovery_timer: f32,

    // --- Screen effects ---
    pub fov_punch: f32,
    pub shake_intensity: f32,
    pub shake_offset: Vec2,
    pub chroma: f32,

    // --- Model ---
    pub kick_back: f32,
    pub kick_rotation: f32,
    pub micro_shake: Vec2,
    micro_shake_timer: f32,
    pub sway: Vec2,
    pub sprint_blend: f32,
    pub reload_blend: f32,
    pub bob_offset: Vec2,
}

impl WeaponSystem {
    pub fn new(configs: &[WeaponConfig; 9]) -> Self {
        let mut system = Self {
            configs: configs.clone(),
            slots: [AmmoSlot::default(); 9],
            current: WeaponKind::default(),
            reload: None,
            zoomed: false,
            time_since_last_shot: f32::MAX,
            bloom: 0.0,
            shots_in_burst: 0,
            recoil_pitch: 0.0,
            recoil_yaw: 0.0,
            recovery_timer: 0.0,
            fov_punch: 0.0,
            shake_intensity: 0.0,
            shake_offset: Vec2::ZERO,
            chroma: 0.0,
            kick_back: 0.0,
            kick_rotation: 0.0,
            micro_shake: Vec2::ZERO,
            micro_shake_timer: 0.0,
            sway: Vec2::ZERO,
            sprint_blend: 0.0,
            reload_blend: 0.0,
            bob_offset: Vec2::ZERO,
        };
        system.reset();
        system
    }

    /// Refill every slot, select the default weapon and clear all transient state.
    pub fn reset(&mut self) {
        for (slot, cfg) in self.slots.iter_mut().zip(self.configs.iter()) {
            *slot = AmmoSlot {
                magazine: cfg.magazine_size,
                reserve: cfg.reserve_ammo,
            };
        }
        self.current = WeaponKind::default();
        self.reset_transient();
        self.time_since_last_shot = f32::MAX;
        self.fov_punch = 0.0;
        self.shake_intensity = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.chroma = 0.0;
        self.kick_back = 0.0;
        self.kick_rotation = 0.0;
        self.micro_shake = Vec2::ZERO;
        self.micro_shake_timer = 0.0;
        self.sway = Vec2::ZERO;
        self.sprint_blend = 0.0;
        self.reload_blend = 0.0;
        self.bob_offset = Vec2::ZERO;
    }

    /// Per-weapon runtime state cleared on a switch.
    fn reset_transient(&mut self) {
        self.reload = None;
        self.zoomed = false;
        self.shots_in_burst = 0;
        self.bloom = 0.0;
        self.recoil_pitch = 0.0;
        self.recoil_yaw = 0.0;
        self.recovery_timer = 0.0;
    }

    // --- Queries ---

    pub fn current(&self) -> WeaponKind {
        self.current
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.configs[self.current.index()]
    }

    pub fn slot(&self, kind: WeaponKind) -> AmmoSlot {
        self.slots[kind.index()]
    }

    pub fn slots(&self) -> &[AmmoSlot; 9] {
        &self.slots
    }

    pub fn magazine(&self) -> u32 {
        self.slots[self.current.index()].magazine
    }

    pub fn reserve(&self) -> u32 {
        self.slots[self.current.index()].reserve
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    pub fn pending_reload(&self) -> Option<&PendingReload> {
        self.reload.as_ref()
    }

    /// Fraction of the running reload already elapsed, 0 when idle.
    pub fn reload_progress(&self) -> f32 {
        match &self.reload {
            Some(pending) => {
                let total = self.configs[pending.weapon.index()].reload_time;
                if total > 0.0 {
                    (1.0 - pending.remaining / total).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            None => 0.0,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// Spread the next shot would get, for the crosshair.
    pub fn current_spread(&self, on_ground: bool, sprinting: bool, horizontal_speed: f32) -> f32 {
        spread_for(
            &self.config().spread,
            self.bloom,
            on_ground,
            sprinting,
            horizontal_speed,
        )
    }

    // --- State machine ---

    /// Whether a trigger pull would fire right now.
    pub fn can_fire(&self, rate_multiplier: f32) -> bool {
        if self.reload.is_some() || self.magazine() == 0 {
            return false;
        }
        self.time_since_last_shot >= self.config().shot_interval(rate_multiplier)
    }

    /// Fire the active weapon. Returns `None` when firing is not allowed.
    pub fn fire<R: Rng>(&mut self, ctx: &ShotContext, rng: &mut R) -> Option<Volley> {
        if !self.can_fire(ctx.rate_multiplier) {
            return None;
        }
        let idx = self.current.index();
        let cfg = &self.configs[idx];

        if self.time_since_last_shot > cfg.spray.reset_time {
            self.shots_in_burst = 0;
        }
        self.time_since_last_shot = 0.0;
        self.slots[idx].magazine = self.slots[idx].magazine.saturating_sub(1);

        // Directions
        let spread = spread_for(
            &cfg.spread,
            self.bloom,
            ctx.on_ground,
            ctx.sprinting,
            ctx.horizontal_speed,
        );
        let (spray_pitch, spray_yaw) = cfg.spray.offset(self.shots_in_burst);
        let directions = (0..cfg.pellets)
            .map(|_| {
                let dx = (rng.gen::<f32>() - 0.5) * spread + spray_yaw;
                let dy = (rng.gen::<f32>() - 0.5) * spread + spray_pitch;
                (ctx.forward + ctx.right * dx + ctx.up * dy)
                    .try_normalize()
                    .unwrap_or(ctx.forward)
            })
            .collect();

        self.bloom = (self.bloom + cfg.spread.bloom_per_shot).min(cfg.spread.bloom_max);

        // Recoil
        let recoil = &cfg.recoil;
        self.recoil_pitch = (self.recoil_pitch
            + recoil.pitch_amount
            + (rng.gen::<f32>() - 0.5) * recoil.pitch_random)
            .min(recoil.max_pitch);
        self.recoil_yaw = (self.recoil_yaw
            + (rng.gen::<f32>() - 0.5) * recoil.yaw_amount
            + (rng.gen::<f32>() - 0.5) * recoil.yaw_random)
            .clamp(-recoil.max_yaw, recoil.max_yaw);
        self.recovery_timer = recoil.recovery_delay;
        self.kick_back = recoil.kick_back;
        self.kick_rotation = recoil.kick_rotation_deg.to_radians();

        let screen = &cfg.screen;
        self.micro_shake_timer = MICRO_SHAKE_TIME;
        self.micro_shake = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
            * screen.shake_intensity;

        // Screen effects
        self.fov_punch = (self.fov_punch + screen.fov_punch).min(screen.max_fov_punch);
        self.shake_intensity = self.shake_intensity.max(screen.shake_intensity);
        self.chroma = (self.chroma + screen.chroma_intensity).min(screen.max_chroma);

        self.shots_in_burst += 1;

        Some(Volley {
            weapon: self.current,
            directions,
        })
    }

    /// Start reloading the active weapon. Rejected while reloading, with a
    /// full magazine, or with no reserve.
    pub fn try_reload(&mut self, round: u32) -> bool {
        let slot = self.slots[self.current.index()];
        if self.reload.is_some()
            || slot.magazine >= self.config().magazine_size
            || slot.reserve == 0
        {
            return false;
        }
        self.reload = Some(PendingReload {
            weapon: self.current,
            round,
            remaining: self.config().reload_time,
        });
        true
    }

    /// Count down the pending reload and apply it when due. A reload that
    /// no longer matches the active weapon or round is dropped.
    fn advance_reload(&mut self, dt: f32, round: u32) -> Option<ReloadFinished> {
        let pending = self.reload.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining > 0.0 {
            return None;
        }
        let pending = self.reload.take()?;
        if pending.round != round || pending.weapon != self.current {
            trace!(
                weapon = pending.weapon.name(),
                round = pending.round,
                "dropping stale reload"
            );
            return None;
        }

        let size = self.configs[pending.weapon.index()].magazine_size;
        let slot = &mut self.slots[pending.weapon.index()];
        let to_load = size.saturating_sub(slot.magazine).min(slot.reserve);
        slot.magazine += to_load;
        slot.reserve -= to_load;
        Some(ReloadFinished {
            weapon: pending.weapon,
            magazine: slot.magazine,
            reserve: slot.reserve,
        })
    }

    /// Select a weapon by index. Rejected while reloading, for an invalid
    /// index, or when the weapon is already active.
    pub fn switch_weapon(&mut self, index: usize) -> bool {
        let Some(kind) = WeaponKind::from_index(index) else {
            return false;
        };
        if kind == self.current || self.reload.is_some() {
            return false;
        }
        self.current = kind;
        self.reset_transient();
        true
    }

    /// Cycle the active weapon with wraparound.
    pub fn scroll_weapon(&mut self, delta: i32) -> bool {
        let count = WeaponKind::ALL.len() as i32;
        let index = (self.current.index() as i32 + delta.rem_euclid(count)) % count;
        self.switch_weapon(index as usize)
    }

    /// Set the zoom flag. Returns false when nothing changed, including for
    /// weapons that cannot zoom.
    pub fn set_zoom(&mut self, zoomed: bool) -> bool {
        if !self.config().zoomable || self.zoomed == zoomed {
            return false;
        }
        self.zoomed = zoomed;
        true
    }

    /// Add rounds to the active weapon's reserve.
    pub fn add_ammo(&mut self, amount: u32) {
        let slot = &mut self.slots[self.current.index()];
        slot.reserve = slot.reserve.saturating_add(amount);
    }

    /// Raise camera shake to at least `intensity`.
    pub fn bump_shake(&mut self, intensity: f32) {
        self.shake_intensity = self.shake_intensity.max(intensity);
    }

    /// Advance one frame: reload countdown, then decay of every feedback
    /// accumulator and the cosmetic handling blends.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        input: &HandlingInput,
        round: u32,
        rng: &mut R,
    ) -> Option<ReloadFinished> {
        let finished = self.advance_reload(dt, round);
        let reloading = self.reload.is_some();
        let cfg = &self.configs[self.current.index()];

        self.time_since_last_shot += dt;
        self.bloom = (self.bloom - cfg.spread.bloom_recovery * dt).max(0.0);

        // Recoil recovery
        if self.recovery_timer > 0.0 {
            self.recovery_timer -= dt;
        } else {
            let rate = cfg.recoil.recovery_rate;
            self.recoil_pitch = (self.recoil_pitch - rate * dt).max(0.0);
            self.recoil_yaw *= (1.0 - rate * dt).max(0.0);
        }

        // Model kick
        let kick_decay = (1.0 - KICK_RECOVERY_RATE * dt).max(0.0);
        self.kick_back *= kick_decay;
        self.kick_rotation *= kick_decay;

        let screen = &cfg.screen;
        if self.micro_shake_timer > 0.0 {
            self.micro_shake_timer -= dt;
            self.micro_shake *= screen.shake_decay;
        } else {
            self.micro_shake = Vec2::ZERO;
        }

        if self.shake_intensity > 0.0 {
            self.shake_offset = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
                * self.shake_intensity;
            self.shake_intensity *= screen.shake_decay;
            if self.shake_intensity < SHAKE_EPSILON {
                self.shake_intensity = 0.0;
            }
        } else {
            self.shake_offset = Vec2::ZERO;
        }

        self.fov_punch = (self.fov_punch - screen.fov_punch_recovery * dt).max(0.0);
        self.chroma *= screen.chroma_decay;
        if self.chroma < CHROMA_EPSILON {
            self.chroma = 0.0;
        }

        // Handling
        let handling = &cfg.handling;
        let sway_target = input.look_delta * handling.sway_amount;
        self.sway += (sway_target - self.sway) * (handling.sway_recovery * dt).min(1.0);
        let sprint_target = if input.sprinting { 1.0 } else { 0.0 };
        self.sprint_blend +=
            (sprint_target - self.sprint_blend) * (handling.sprint_blend_speed * dt).min(1.0);
        let reload_target = if reloading { 1.0 } else { 0.0 };
        self.reload_blend +=
            (reload_target - self.reload_blend) * (handling.reload_blend_speed * dt).min(1.0);
        self.bob_offset = Vec2::new(
            (input.bob_time * 0.5).cos() * 0.015,
            input.bob_time.sin() * 0.035,
        ) * handling.bob_influence;

        finished
    }

    #[cfg(test)]
    pub(crate) fn set_slot(&mut self, kind: WeaponKind, slot: AmmoSlot) {
        let size = self.configs[kind.index()].magazine_size;
        self.slots[kind.index()] = AmmoSlot {
            magazine: slot.magazine.min(size),
            reserve: slot.reserve,
        };
    }
}

/// Base spread scaled by the stance modifier, plus bloom.
/// Airborne beats sprinting beats moving beats standing still.
fn spread_for(
    cfg: &SpreadConfig,
    bloom: f32,
    on_ground: bool,
    sprinting: bool,
    horizontal_speed: f32,
) -> f32 {
    let modifier = if !on_ground {
        cfg.air_multiplier
    } else if sprinting {
        cfg.sprint_multiplier
    } else if horizontal_speed > MOVING_SPEED_THRESHOLD {
        cfg.move_multiplier
    } else {
        1.0
    };
    cfg.base * modifier + bloom
}
