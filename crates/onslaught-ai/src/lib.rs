//! Enemy AI for Onslaught.
//!
//! Implements per-enemy steering, the distance-band stance machine,
//! line-of-sight gated firing and health-driven appearance.

pub mod appearance;
pub mod fsm;
pub mod perception;
pub mod profiles;

pub use onslaught_core as core;

#[cfg(test)]
mod tests;
