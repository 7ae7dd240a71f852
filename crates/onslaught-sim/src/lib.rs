//! Simulation engine for Onslaught.
//!
//! Owns the hecs ECS world, steps the player, weapons, enemies and waves in
//! a fixed order each frame, and produces GameStateSnapshots for the
//! presentation layer.

pub mod engine;
pub mod player;
pub mod scheduler;
pub mod session;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use onslaught_core as core;
