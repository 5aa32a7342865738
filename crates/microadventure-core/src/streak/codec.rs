//! Decoding and encoding [`PersistedState`] to string key/values.
//!
//! Every key is decoded on its own. A missing key yields its default; an
//! unreadable or malformed one is logged and also yields its default, so a
//! corrupt value never reaches the state machine.

use chrono::NaiveDate;

use super::state::{HistoryEntry, PersistedState, HISTORY_LIMIT};
use crate::error::{CoreError, Result, StorageError};
use crate::storage::{keys, KvStore};

const DATE_FORMAT: &str = "%Y-%m-%d";
/// `Date.prototype.toDateString()` layout, e.g. `Sat Jan 06 2024`.
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

fn corrupt(key: &str, message: impl std::fmt::Display) -> CoreError {
    CoreError::PersistenceReadCorrupt {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn read<S: KvStore>(store: &S, key: &str) -> Result<Option<String>> {
    store.get(key).map_err(|e| corrupt(key, e))
}

fn recover<T: Default>(key: &str, decoded: Result<T>) -> T {
    decoded.unwrap_or_else(|e| {
        tracing::warn!(key, "{e}; falling back to default");
        T::default()
    })
}

pub(crate) fn decode_streak(raw: Option<&str>) -> Result<u32> {
    match raw {
        None => Ok(0),
        Some(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| corrupt(keys::STREAK, format!("'{s}': {e}"))),
    }
}

pub(crate) fn decode_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(s) = raw else {
        return Ok(None);
    };
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, LEGACY_DATE_FORMAT))
        .map(Some)
        .map_err(|e| corrupt(keys::LAST_COMPLETION_DATE, format!("'{s}': {e}")))
}

pub(crate) fn decode_history(raw: Option<&str>) -> Result<Vec<HistoryEntry>> {
    let Some(s) = raw else {
        return Ok(Vec::new());
    };
    let mut history: Vec<HistoryEntry> =
        serde_json::from_str(s).map_err(|e| corrupt(keys::ADVENTURE_HISTORY, e))?;
    history.truncate(HISTORY_LIMIT);
    Ok(history)
}

/// Read the state, substituting defaults for anything missing or corrupt.
pub fn load<S: KvStore>(store: &S) -> PersistedState {
    let streak = read(store, keys::STREAK).and_then(|raw| decode_streak(raw.as_deref()));
    let date =
        read(store, keys::LAST_COMPLETION_DATE).and_then(|raw| decode_date(raw.as_deref()));
    let text = read(store, keys::LAST_ADVENTURE_TEXT);
    let history =
        read(store, keys::ADVENTURE_HISTORY).and_then(|raw| decode_history(raw.as_deref()));

    PersistedState {
        streak: recover(keys::STREAK, streak),
        last_completion_date: recover(keys::LAST_COMPLETION_DATE, date),
        last_adventure_text: recover(keys::LAST_ADVENTURE_TEXT, text),
        history: recover(keys::ADVENTURE_HISTORY, history),
    }
}

fn write<S: KvStore>(store: &mut S, key: &str, value: &str) -> Result<(), StorageError> {
    store.set(key, value).map_err(|e| StorageError::WriteFailed {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Write `last_adventure_text` only.
pub fn save_selection<S: KvStore>(
    state: &PersistedState,
    store: &mut S,
) -> Result<(), StorageError> {
    match &state.last_adventure_text {
        Some(text) => write(store, keys::LAST_ADVENTURE_TEXT, text),
        None => Ok(()),
    }
}

/// Write every key of the state, stopping at the first failure.
pub fn save<S: KvStore>(state: &PersistedState, store: &mut S) -> Result<(), StorageError> {
    write(store, keys::STREAK, &state.streak.to_string())?;
    if let Some(date) = state.last_completion_date {
        write(
            store,
            keys::LAST_COMPLETION_DATE,
            &date.format(DATE_FORMAT).to_string(),
        )?;
    }
    save_selection(state, store)?;
    let history = serde_json::to_string(&state.history).map_err(|e| StorageError::WriteFailed {
        key: keys::ADVENTURE_HISTORY.to_string(),
        message: e.to_string(),
    })?;
    write(store, keys::ADVENTURE_HISTORY, &history)
}
