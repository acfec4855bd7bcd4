//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use cyberfolio::app::App;
use cyberfolio::config::{Config, GameSettings, StorageBackend, StorageSettings};
use cyberfolio::games::SYMBOLS;
use cyberfolio::storage::{SharedStore, SqliteStore};

/// Database path inside a temp dir
pub fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("cyberfolio.db")
}

/// Config pointing at a SQLite file in `dir`, with short game timers
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        storage: StorageSettings {
            backend: StorageBackend::Sqlite,
            path: Some(db_path(dir)),
        },
        games: GameSettings {
            conceal_delay_ms: 20,
            clock_tick_ms: 10,
        },
        ..Config::default()
    }
}

/// Opens (or reopens) the application over the temp dir's database
pub fn open_app(dir: &TempDir) -> App {
    App::open(&test_config(dir)).expect("Failed to open app")
}

/// Raw store over the same database, for inspecting records
pub fn open_store(dir: &TempDir) -> SharedStore {
    Arc::new(SqliteStore::open(&db_path(dir)).expect("Failed to open store"))
}

/// Deck where each pair sits side by side: 0-1, 2-3, ...
pub fn paired_deck() -> Vec<&'static str> {
    SYMBOLS.iter().flat_map(|s| [*s, *s]).collect()
}
