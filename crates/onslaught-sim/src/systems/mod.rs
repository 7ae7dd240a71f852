//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus whatever engine-owned state they update. They hold no state of
//! their own.

pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod pickups;
pub mod snapshot;
pub mod wave_spawner;
