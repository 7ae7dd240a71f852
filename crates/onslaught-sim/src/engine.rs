//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the player, the weapon system
//! and the session, processes player commands, runs every system in a fixed
//! order and produces `GameStateSnapshot`s. Completely headless, so a seed
//! plus an input sequence always reproduces the same snapshots.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use onslaught_ai::fsm::aim_point;
use onslaught_ai::perception::aim_direction;
use onslaught_core::commands::{InputFrame, PlayerCommand};
use onslaught_core::config::GameConfig;
use onslaught_core::constants::*;
use onslaught_core::enums::{GamePhase, WavePhase};
use onslaught_core::error::ConfigError;
use onslaught_core::events::GameEvent;
use onslaught_core::state::GameStateSnapshot;
use onslaught_core::types::{forward_from, SimTime};

use crate::player::{MoveInput, PlayerController};
use crate::scheduler::Scheduler;
use crate::session::GameSession;
use crate::systems;
use crate::systems::combat::EnemyShotOutcome;
use crate::systems::enemy_ai::EnemyShot;
use crate::weapons::{HandlingInput, ShotContext, WeaponSystem};
use crate::world_setup::Arena;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Player, weapon and enemy tuning.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// Deferred wave-lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveAction {
    Start { wave: u32 },
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: GameConfig,
    arena: Arena,
    rng: ChaCha8Rng,
    player: PlayerController,
    weapon: WeaponSystem,
    session: GameSession,
    scheduler: Scheduler<WaveAction>,
    next_enemy_id: u32,
    next_pickup_id: u32,
    fire_held_last_frame: bool,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// The game tuning is used as given; see [`SimulationEngine::try_new`].
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            arena: Arena::standard(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: PlayerController::new(config.game.player.clone()),
            weapon: WeaponSystem::new(&config.game.weapons),
            session: GameSession::default(),
            scheduler: Scheduler::new(),
            next_enemy_id: 0,
            next_pickup_id: 0,
            fire_held_last_frame: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config: config.game,
        }
    }

    /// Validate the game tuning, then create the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        Ok(Self::new(config))
    }

    /// Replace the arena. Takes effect immediately, including mid-game.
    pub fn with_arena(mut self, arena: Arena) -> Self {
        self.arena = arena;
        self
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot. `dt` is clamped to `[0, MAX_FRAME_DT]`.
    pub fn step(&mut self, dt: f32, input: &InputFrame) -> GameStateSnapshot {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt, input);
        }
        self.fire_held_last_frame = input.fire_held;

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.session,
            &self.player,
            &self.weapon,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn weapon(&self) -> &WeaponSystem {
        &self.weapon
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn weapon_mut(&mut self) -> &mut WeaponSystem {
        &mut self.weapon
    }

    /// Spawn a single enemy outside the wave schedule (for testing).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(
        &mut self,
        tier: onslaught_core::enums::EnemyTier,
        position: Vec3,
    ) -> hecs::Entity {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        crate::world_setup::spawn_enemy(
            &mut self.world,
            &mut self.rng,
            self.config.enemy(tier),
            id,
            position,
        )
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Drop every scheduled wave action (for testing).
    #[cfg(test)]
    pub(crate) fn cancel_pending_waves(&mut self) {
        self.scheduler.clear();
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Active => self.phase = GamePhase::Paused,
                GamePhase::Paused => self.phase = GamePhase::Active,
                _ => {}
            },
            _ if self.phase != GamePhase::Active => {}
            PlayerCommand::Jump => self.player.request_jump(),
            PlayerCommand::Reload => {
                if self.weapon.try_reload(self.session.round) {
                    let weapon = self.weapon.current();
                    self.events.push(GameEvent::ReloadStarted {
                        weapon,
                        duration_secs: self.weapon.config().reload_time,
                    });
                }
            }
            PlayerCommand::SelectWeapon { index } => {
                let was_zoomed = self.weapon.is_zoomed();
                let switched = self.weapon.switch_weapon(index);
                self.after_switch(switched, was_zoomed);
            }
            PlayerCommand::ScrollWeapon { delta } => {
                let was_zoomed = self.weapon.is_zoomed();
                let switched = self.weapon.scroll_weapon(delta);
                self.after_switch(switched, was_zoomed);
            }
        }
    }

    fn after_switch(&mut self, switched: bool, was_zoomed: bool) {
        if !switched {
            return;
        }
        let weapon = self.weapon.current();
        debug!(weapon = weapon.name(), "weapon switched");
        self.events.push(GameEvent::WeaponSwitched { weapon });
        // The switch drops any zoom.
        if was_zoomed {
            self.player.snap_fov(false);
            self.events.push(GameEvent::ZoomChanged { zoomed: false });
        }
    }

    /// Start a new game, superseding any running one.
    fn start_game(&mut self) {
        let round = self.session.begin_round();
        self.world.clear();
        self.scheduler.clear();
        self.player.reset();
        self.weapon.reset();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;

        systems::pickups::spawn_wave_pickups(
            &mut self.world,
            &mut self.rng,
            &mut self.next_pickup_id,
            self.session.wave,
            &self.player,
            &mut self.events,
        );
        self.scheduler.schedule(
            self.time.elapsed_secs,
            FIRST_WAVE_DELAY,
            round,
            WaveAction::Start {
                wave: self.session.wave,
            },
        );
        info!(round, "game started");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, input: &InputFrame) {
        // 1. Clock
        self.time.advance(dt);

        // 2. Deferred wave actions
        for action in self
            .scheduler
            .take_due(self.time.elapsed_secs, self.session.round)
        {
            match action {
                WaveAction::Start { wave } => self.start_wave(wave),
            }
        }

        // 3. Player movement and powerups
        let move_input = MoveInput {
            move_intent: input.move_intent,
            wants_sprint: input.sprint_held,
            jump_held: input.jump_held,
        };
        let limit = self.arena.player_limit();
        if let Some(impact) =
            self.player
                .update(dt, &move_input, &self.arena.obstacles, limit)
        {
            self.events.push(GameEvent::Landed { impact });
        }
        if let Some(kind) = self.player.update_powerup(dt) {
            debug!(?kind, "powerup expired");
        }

        // 4. Look rotation
        self.player.rotate(input.look_delta);

        // 5. Zoom
        if self.weapon.set_zoom(input.aim_held) {
            let zoomed = self.weapon.is_zoomed();
            self.player.snap_fov(zoomed);
            self.events.push(GameEvent::ZoomChanged { zoomed });
        }

        // 6. Fire and player-shot resolution
        if input.fire_held {
            self.fire_weapon();
        }

        // 7. Weapon update, including reload completion
        let handling = HandlingInput {
            look_delta: input.look_delta,
            sprinting: self.player.sprinting,
            bob_time: self.player.head_bob_time,
        };
        if let Some(done) =
            self.weapon
                .update(dt, &handling, self.session.round, &mut self.rng)
        {
            debug!(
                weapon = done.weapon.name(),
                magazine = done.magazine,
                reserve = done.reserve,
                "reload complete"
            );
            self.events.push(GameEvent::ReloadCompleted {
                weapon: done.weapon,
                magazine: done.magazine,
                reserve: done.reserve,
            });
        }

        // 8. Camera
        self.player
            .update_camera(dt, self.weapon.is_zoomed(), self.weapon.fov_punch);

        // 9. Enemy AI and enemy shots
        let shots = systems::enemy_ai::run(
            &mut self.world,
            &self.config,
            self.player.position,
            self.player.config().height,
            &self.arena.obstacles,
            dt,
        );
        for shot in shots {
            self.resolve_enemy_shot(&shot);
            if self.phase != GamePhase::Active {
                break;
            }
        }

        // 10. Pickups
        if self.phase == GamePhase::Active {
            systems::pickups::collect(
                &mut self.world,
                &mut self.player,
                &mut self.weapon,
                &mut self.events,
            );
        }

        // 11. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 12. Wave completion
        if self.phase == GamePhase::Active
            && self.session.wave_phase == WavePhase::WaveInProgress
            && systems::cleanup::enemies_alive(&self.world) == 0
        {
            self.complete_wave();
        }
    }

    /// Pull the trigger on the active weapon and resolve the volley.
    fn fire_weapon(&mut self) {
        let rate = self.player.fire_rate_multiplier();
        if !self.weapon.can_fire(rate) {
            let empty = self.weapon.magazine() == 0 && !self.weapon.is_reloading();
            if empty && !self.fire_held_last_frame {
                self.events.push(GameEvent::DryFire {
                    weapon: self.weapon.current(),
                });
            }
            return;
        }

        // Aim along the view, recoil included
        let pitch = (self.player.pitch + self.weapon.recoil_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        let yaw = self.player.yaw + self.weapon.recoil_yaw;
        let forward = forward_from(pitch, yaw);
        let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        let up = right.cross(forward);
        let ctx = ShotContext {
            forward,
            right,
            up,
            on_ground: self.player.on_ground,
            sprinting: self.player.sprinting,
            horizontal_speed: self.player.horizontal_speed(),
            rate_multiplier: rate,
        };

        let Some(volley) = self.weapon.fire(&ctx, &mut self.rng) else {
            return;
        };
        self.events.push(GameEvent::ShotFired {
            weapon: volley.weapon,
        });

        let damage = self.weapon.config().damage * self.player.damage_multiplier;
        systems::combat::resolve_player_volley(
            &mut self.world,
            &mut self.rng,
            &self.config,
            &mut self.session,
            &mut self.next_pickup_id,
            &mut self.events,
            self.player.position,
            &volley.directions,
            damage,
            &self.arena.obstacles,
        );
    }

    /// Aim, trace and apply one enemy shot against the player.
    fn resolve_enemy_shot(&mut self, shot: &EnemyShot) {
        let enemy_config = self.config.enemy(shot.tier);
        self.events.push(GameEvent::EnemyFired {
            enemy_id: shot.enemy_id,
            weapon: enemy_config.weapon,
        });

        let target = aim_point(self.player.position, self.player.config().height);
        let direction = aim_direction(shot.origin, target, enemy_config.accuracy, &mut self.rng);
        let outcome = systems::combat::resolve_enemy_shot(
            shot.origin,
            direction,
            target,
            &self.player.bounds(),
            &self.arena.obstacles,
        );

        match outcome {
            EnemyShotOutcome::Hit => {
                let dead = self.player.take_damage(enemy_config.damage);
                self.weapon.bump_shake(HIT_CAMERA_SHAKE);
                self.events.push(GameEvent::PlayerDamaged {
                    amount: enemy_config.damage,
                    health: self.player.health,
                    armor: self.player.armor,
                    relative_angle: self.player.relative_bearing(shot.origin),
                });
                if dead {
                    self.game_over();
                }
            }
            EnemyShotOutcome::NearMiss { point } => {
                self.events.push(GameEvent::NearMiss { point });
            }
            EnemyShotOutcome::Blocked { hit, material } => {
                self.events.push(GameEvent::SurfaceImpact {
                    point: hit.point,
                    normal: hit.normal,
                    material,
                });
            }
            EnemyShotOutcome::Miss => {}
        }
    }

    fn start_wave(&mut self, wave: u32) {
        self.session.wave = wave;
        self.session.wave_phase = WavePhase::WaveInProgress;
        let enemies = systems::wave_spawner::spawn_wave(
            &mut self.world,
            &mut self.rng,
            &self.config,
            &self.arena.spawn_points,
            wave,
            &mut self.next_enemy_id,
        );
        info!(wave, enemies, "wave started");
        self.events.push(GameEvent::WaveStarted { wave, enemies });
    }

    fn complete_wave(&mut self) {
        let wave = self.session.wave;
        let bonus = self.session.complete_wave();
        info!(wave, bonus, score = self.session.score, "wave cleared");
        self.events.push(GameEvent::WaveCleared { wave, bonus });

        systems::pickups::spawn_wave_pickups(
            &mut self.world,
            &mut self.rng,
            &mut self.next_pickup_id,
            wave,
            &self.player,
            &mut self.events,
        );
        self.scheduler.schedule(
            self.time.elapsed_secs,
            NEXT_WAVE_DELAY,
            self.session.round,
            WaveAction::Start { wave: wave + 1 },
        );
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        if let Some(stats) = self.session.finish(self.time.elapsed_secs) {
            info!(
                wave = stats.wave,
                kills = stats.kills,
                accuracy = stats.accuracy,
                score = stats.score,
                "game over"
            );
            self.events.push(GameEvent::GameOver { stats });
        }
    }
}
