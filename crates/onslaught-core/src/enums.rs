//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running yet.
    #[default]
    MainMenu,
    /// Simulation advancing every frame.
    Active,
    /// Session exists but frames do not advance it.
    Paused,
    /// Player died; final stats have been reported.
    GameOver,
}

/// Wave lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the scheduled start of the next wave.
    #[default]
    BetweenWaves,
    /// Enemies alive in the arena.
    WaveInProgress,
    /// All enemies cleared; bonus awarded, next wave pending.
    WaveComplete,
}

/// Weapon kinds, in selection-index order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Ak47,
    M4,
    Scar,
    Lmg,
    Tec9,
    Pistol,
    Shotgun,
    Sniper,
    Awp,
}

impl WeaponKind {
    /// All kinds in selection order (index 0..=8).
    pub const ALL: [WeaponKind; 9] = [
        WeaponKind::Ak47,
        WeaponKind::M4,
        WeaponKind::Scar,
        WeaponKind::Lmg,
        WeaponKind::Tec9,
        WeaponKind::Pistol,
        WeaponKind::Shotgun,
        WeaponKind::Sniper,
        WeaponKind::Awp,
    ];

    /// Weapon at a selection index, if any.
    pub fn from_index(index: usize) -> Option<WeaponKind> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Ak47 => "AK-47",
            WeaponKind::M4 => "M4",
            WeaponKind::Scar => "SCAR",
            WeaponKind::Lmg => "LMG",
            WeaponKind::Tec9 => "TEC-9",
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Sniper => "Sniper",
            WeaponKind::Awp => "AWP",
        }
    }
}

/// Enemy tier. Each tier has its own stat block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Grunt.
    #[default]
    Light,
    /// Soldier.
    Medium,
    Heavy,
}

/// Timed player powerups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Doubles outgoing damage.
    Damage,
    /// Multiplies movement speed by 1.5.
    Speed,
    /// Doubles weapon fire rate.
    Rapid,
}

/// Collectible pickup kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Armor,
    Ammo,
    Powerup(PowerupKind),
}

/// Surface material of an obstacle. Only used for impact feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Concrete,
    Metal,
    Wood,
}

/// What a player shot ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitZone {
    Head,
    Body,
}
