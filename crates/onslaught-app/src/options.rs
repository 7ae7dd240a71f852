//! Command-line options for the headless runner.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use onslaught_core::config::GameConfig;
use onslaught_core::error::ConfigError;
use onslaught_sim::SimConfig;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Parser)]
#[command(name = "onslaught")]
#[command(about = "Headless Onslaught runner driven by a scripted autopilot")]
#[command(version)]
pub struct Cli {
    /// Seed for the simulation RNG
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Wall-clock seconds before the run is stopped
    #[arg(long, default_value_t = 120)]
    pub seconds: u64,

    /// JSON file replacing the built-in tuning tables
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Everything one headless run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sim: SimConfig,
    /// Stop after this much wall-clock time even if the player survives.
    pub max_duration: Duration,
}

impl Cli {
    /// Load and validate the config file, if any.
    pub fn into_options(self) -> Result<RunOptions, OptionsError> {
        let game = match self.config {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| OptionsError::ReadConfig { path, source })?;
                GameConfig::from_json(&json)?
            }
            None => GameConfig::default(),
        };
        Ok(RunOptions {
            sim: SimConfig {
                seed: self.seed,
                game,
            },
            max_duration: Duration::from_secs(self.seconds),
        })
    }
}
