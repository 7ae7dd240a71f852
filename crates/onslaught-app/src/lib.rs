//! Onslaught headless runner.
//!
//! This crate wires the simulation to a wall-clock frame loop on its own
//! thread, drives it with an autopilot input source, and reports the final
//! stats.

pub mod autopilot;
pub mod game_loop;
pub mod options;
pub mod state;

pub use onslaught_core as core;
