mod config;
pub mod database;
pub mod memory;

pub use config::{Config, HistoryConfig, PromptsConfig, ShareConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Persisted key names, shared by every store backend.
pub mod keys {
    pub const STREAK: &str = "streak";
    pub const LAST_COMPLETION_DATE: &str = "lastCompletionDate";
    pub const LAST_ADVENTURE_TEXT: &str = "lastAdventureText";
    pub const ADVENTURE_HISTORY: &str = "adventureHistory";
    /// Prompt currently presented to the user (UI state, not streak state).
    pub const ACTIVE_ADVENTURE: &str = "activeAdventure";
}

/// String key/value persistence, the shape of browser `localStorage`.
///
/// Read-modify-write sequences go through [`KvStore::transaction`]; backends
/// shared between processes must make that a real transaction.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Run `f` as one logical transaction.
    ///
    /// `f` returns its value plus the outcome of its writes. The value is
    /// always handed back; the returned `Result` reports the first write,
    /// begin, or commit failure.
    fn transaction<T, F>(&mut self, f: F) -> (T, Result<(), StorageError>)
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> (T, Result<(), StorageError>),
    {
        f(self)
    }
}

/// Returns `~/.config/microadventure[-dev]/` based on MICROADVENTURE_ENV.
///
/// Set MICROADVENTURE_ENV=dev to use development data directory, or
/// MICROADVENTURE_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("MICROADVENTURE_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("MICROADVENTURE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("microadventure-dev")
            } else {
                base_dir.join("microadventure")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
