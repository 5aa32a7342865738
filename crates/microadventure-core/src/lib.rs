//! # Micro-Adventure Core Library
//!
//! This library provides the core logic for Micro-Adventure: pick a random
//! small adventure, mark it done, and keep a daily completion streak plus a
//! bounded history log in local storage. Front ends (the CLI, or any other
//! UI) are thin layers over the same library.
//!
//! ## Architecture
//!
//! - **Adventure**: built-in prompt catalog and uniform random picking
//! - **Streak**: the completion state machine and its persisted state
//! - **Session**: generate → complete → share flow with a resumable active prompt
//! - **Storage**: key/value stores (SQLite, in-memory) and TOML configuration
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: Owns the store; the only place state is mutated
//! - [`PersistedState`]: Typed snapshot of streak, last adventure and history
//! - [`AdventureSession`]: Flow used by front ends
//! - [`Config`]: Application configuration management

pub mod adventure;
pub mod error;
pub mod session;
pub mod storage;
pub mod streak;

pub use adventure::{pick, pick_with, DEFAULT_ADVENTURES, FALLBACK_MESSAGE};
pub use error::{ConfigError, CoreError, PersistenceWarning, StorageError};
pub use session::{share_message, AdventureSession, Generated};
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
pub use streak::{
    CompletionReport, HistoryEntry, PersistedState, StreakTracker, StreakTransition, HISTORY_LIMIT,
};
