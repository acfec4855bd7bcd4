//! Configuration loading and management

mod io;
mod settings;

pub use settings::{GameSettings, LogSettings, StorageBackend, StorageSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.cyberfolio/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where progress, identity and preferences are persisted
    #[serde(default)]
    pub storage: StorageSettings,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default)]
    pub logging: LogSettings,

    /// Timings for the game board views
    #[serde(default)]
    pub games: GameSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from an explicit path, or the global config when none is given.
    /// A missing global config yields defaults without creating a file.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let global_path = Self::global_config_path();
                if global_path.exists() {
                    Self::from_file(&global_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
