//! Streak tracker: the single owner of the persisted state.
//!
//! All mutation goes through [`StreakTracker::record_completion`] and
//! [`StreakTracker::select_adventure`]. Completions run inside one store
//! transaction so two writers cannot interleave their read and write.
//!
//! ```ignore
//! let mut tracker = StreakTracker::new(SqliteStore::open()?);
//! tracker.select_adventure(&prompt);
//! let report = tracker.record_completion(&prompt, Local::now().fixed_offset())?;
//! println!("streak: {}", report.state.streak());
//! ```

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::codec;
use super::state::{PersistedState, StreakTransition};
use crate::error::{CoreError, PersistenceWarning, Result};
use crate::storage::KvStore;

/// Outcome of a recorded completion.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub state: PersistedState,
    pub transition: StreakTransition,
    /// Set when the new state could not be persisted. `state` is still
    /// correct for this session.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "warning_text")]
    pub warning: Option<PersistenceWarning>,
}

fn warning_text<S: serde::Serializer>(
    warning: &Option<PersistenceWarning>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match warning {
        Some(w) => serializer.serialize_some(&w.to_string()),
        None => serializer.serialize_none(),
    }
}

impl CompletionReport {
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }
}

/// Owns a [`KvStore`] and runs the completion state machine over it.
pub struct StreakTracker<S> {
    store: S,
}

impl<S: KvStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Snapshot of the persisted state for rendering.
    pub fn get_state(&self) -> PersistedState {
        codec::load(&self.store)
    }

    /// Remember `text` as the last selected adventure.
    ///
    /// Returns a warning instead of failing when the write is rejected.
    pub fn select_adventure(&mut self, text: &str) -> Option<PersistenceWarning> {
        let mut state = PersistedState::default();
        state.select(text);
        match codec::save_selection(&state, &mut self.store) {
            Ok(()) => None,
            Err(e) => {
                let warning = PersistenceWarning::from(e);
                tracing::warn!("{warning}");
                Some(warning)
            }
        }
    }

    /// Record that `text` was completed at `now`.
    ///
    /// # Errors
    /// Returns [`CoreError::NoActivePrompt`] when `text` is blank; nothing
    /// is read or written in that case. Storage failures are reported on
    /// the returned [`CompletionReport`] rather than as errors.
    pub fn record_completion(
        &mut self,
        text: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<CompletionReport> {
        if text.trim().is_empty() {
            return Err(CoreError::NoActivePrompt);
        }

        let ((state, transition), written) = self.store.transaction(|store| {
            let mut state = codec::load(store);
            let transition = state.complete(text, now);
            let written = codec::save(&state, store);
            ((state, transition), written)
        });

        let warning = written.err().map(PersistenceWarning::from);
        if let Some(w) = &warning {
            tracing::warn!("completion kept in memory only: {w}");
        }
        tracing::debug!(
            streak = state.streak(),
            history = state.history().len(),
            "recorded completion: {transition:?}"
        );

        Ok(CompletionReport {
            state,
            transition,
            warning,
        })
    }
}
