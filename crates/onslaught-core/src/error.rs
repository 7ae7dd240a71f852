//! Error types for configuration loading.
//!
//! Gameplay operations never fail with an error; they report rejection
//! through `bool`/`Option` returns instead.

use thiserror::Error;

use crate::enums::{EnemyTier, WeaponKind};

/// Errors produced while loading or validating a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("Failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A weapon table holds values the simulation cannot run with.
    #[error("Invalid weapon config for {kind:?}: {reason}")]
    InvalidWeapon { kind: WeaponKind, reason: String },

    /// An enemy tier holds values the simulation cannot run with.
    #[error("Invalid enemy config for {tier:?}: {reason}")]
    InvalidEnemy { tier: EnemyTier, reason: String },

    /// Player tuning is out of range.
    #[error("Invalid player config: {0}")]
    InvalidPlayer(String),

    /// A per-kind table entry sits at the wrong index.
    #[error("Entry {index} of the {table} table is out of order")]
    TableOrder { table: &'static str, index: usize },
}
