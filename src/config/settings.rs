//! Settings sections of the configuration file

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which key-value store backs the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file on disk
    #[default]
    Sqlite,
    /// Nothing survives the process
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file (defaults to ~/.cyberfolio/cyberfolio.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// How long a mismatched pair stays face-up
    #[serde(default = "default_conceal_delay_ms")]
    pub conceal_delay_ms: u64,

    /// Refresh period of the game clock
    #[serde(default = "default_clock_tick_ms")]
    pub clock_tick_ms: u64,
}

fn default_conceal_delay_ms() -> u64 {
    1000
}

fn default_clock_tick_ms() -> u64 {
    1000
}

impl GameSettings {
    pub fn conceal_delay(&self) -> Duration {
        Duration::from_millis(self.conceal_delay_ms)
    }

    /// Never zero; `tokio::time::interval` panics on a zero period
    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms.max(1))
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            conceal_delay_ms: default_conceal_delay_ms(),
            clock_tick_ms: default_clock_tick_ms(),
        }
    }
}
