pub mod adventure;
pub mod config;
pub mod status;

use microadventure_core::{AdventureSession, Config, SqliteStore, StreakTracker};

/// Open the on-disk store and resume the session with configured prompts.
pub fn open_session() -> Result<(Config, AdventureSession<SqliteStore>), Box<dyn std::error::Error>>
{
    let config = Config::load()?;
    let prompts = config.prompts().unwrap_or_else(|e| {
        tracing::warn!("prompt list unavailable: {e}");
        Vec::new()
    });
    let tracker = StreakTracker::new(SqliteStore::open()?);
    Ok((config, AdventureSession::resume(tracker, prompts)))
}
