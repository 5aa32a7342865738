//! Generate → complete → share flow for a front end.
//!
//! The session holds the prompt list and the prompt currently presented.
//! The active prompt is kept under its own key so a front end that exits
//! between commands can resume where it left off. It is cleared once the
//! adventure is completed.

use chrono::{DateTime, FixedOffset};
use rand::Rng;

use crate::adventure::pick_with;
use crate::error::{CoreError, PersistenceWarning, Result};
use crate::storage::{keys, KvStore};
use crate::streak::{CompletionReport, PersistedState, StreakTracker};

/// A freshly presented adventure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub prompt: String,
    /// Set when the selection could not be remembered across sessions.
    pub warning: Option<PersistenceWarning>,
}

pub struct AdventureSession<S> {
    tracker: StreakTracker<S>,
    prompts: Vec<String>,
    active: Option<String>,
}

impl<S: KvStore> AdventureSession<S> {
    /// Start a session with nothing active.
    pub fn new(tracker: StreakTracker<S>, prompts: Vec<String>) -> Self {
        Self {
            tracker,
            prompts,
            active: None,
        }
    }

    /// Start a session, restoring the active prompt from the store.
    pub fn resume(tracker: StreakTracker<S>, prompts: Vec<String>) -> Self {
        let active = match tracker.store().get(keys::ACTIVE_ADVENTURE) {
            Ok(value) => value.filter(|text| !text.trim().is_empty()),
            Err(e) => {
                tracing::warn!("could not restore active adventure: {e}");
                None
            }
        };
        Self {
            tracker,
            prompts,
            active,
        }
    }

    pub fn tracker(&self) -> &StreakTracker<S> {
        &self.tracker
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn state(&self) -> PersistedState {
        self.tracker.get_state()
    }

    /// Pick a new adventure with the thread RNG and present it.
    pub fn generate(&mut self) -> Result<Generated> {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Pick a new adventure with `rng` and present it.
    ///
    /// # Errors
    /// Returns [`CoreError::NoContentAvailable`] for an empty prompt list;
    /// the previous active prompt is kept in that case.
    pub fn generate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Generated> {
        let prompt = pick_with(&self.prompts, rng)?.clone();
        let warning = self.tracker.select_adventure(&prompt);
        self.set_active(Some(prompt.clone()));
        Ok(Generated { prompt, warning })
    }

    /// Complete the active adventure at `now`.
    ///
    /// # Errors
    /// Returns [`CoreError::NoActivePrompt`] when nothing is presented.
    pub fn complete(&mut self, now: DateTime<FixedOffset>) -> Result<CompletionReport> {
        let text = self.active.clone().ok_or(CoreError::NoActivePrompt)?;
        let report = self.tracker.record_completion(&text, now)?;
        self.set_active(None);
        Ok(report)
    }

    /// Text to hand to a share sheet or clipboard for the active adventure.
    pub fn share_message(&self, url: &str) -> Result<String> {
        let prompt = self.active.as_deref().ok_or(CoreError::NoActivePrompt)?;
        Ok(share_message(prompt, url))
    }

    fn set_active(&mut self, active: Option<String>) {
        let store = self.tracker.store_mut();
        let written = match &active {
            Some(text) => store.set(keys::ACTIVE_ADVENTURE, text),
            None => store.remove(keys::ACTIVE_ADVENTURE),
        };
        if let Err(e) = written {
            tracing::warn!("active adventure not persisted: {e}");
        }
        self.active = active;
    }
}

/// Format the share text for `prompt`, with `url` appended when set.
pub fn share_message(prompt: &str, url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        format!("I just got this micro-adventure: \"{prompt}\"! Can you do it?")
    } else {
        format!("I just got this micro-adventure: \"{prompt}\"! Can you do it? {url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::streak::StreakTransition;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn session(prompts: &[&str]) -> AdventureSession<MemoryStore> {
        AdventureSession::new(
            StreakTracker::new(MemoryStore::new()),
            prompts.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn generate_selects_and_activates() {
        let mut session = session(&["Take a walk"]);
        let generated = session.generate().unwrap();
        assert_eq!(generated.prompt, "Take a walk");
        assert!(generated.warning.is_none());
        assert_eq!(session.active(), Some("Take a walk"));
        assert_eq!(session.state().last_adventure_text(), Some("Take a walk"));
        assert!(session.state().history().is_empty());
    }

    #[test]
    fn generate_from_empty_list_keeps_previous_prompt() {
        let mut session = session(&[]);
        assert!(matches!(
            session.generate(),
            Err(CoreError::NoContentAvailable)
        ));
        assert_eq!(session.active(), None);
    }

    #[test]
    fn complete_without_active_prompt_is_rejected() {
        let mut session = session(&["Take a walk"]);
        let err = session.complete(at("2024-01-06T09:00:00Z")).unwrap_err();
        assert!(matches!(err, CoreError::NoActivePrompt));
        assert_eq!(session.state(), PersistedState::default());
    }

    #[test]
    fn complete_clears_active_prompt() {
        let mut session = session(&["Take a walk", "Visit a museum"]);
        let mut rng = Pcg64::seed_from_u64(1);
        let prompt = session.generate_with(&mut rng).unwrap().prompt;

        let report = session.complete(at("2024-01-06T09:00:00Z")).unwrap();
        assert_eq!(report.transition, StreakTransition::Started);
        assert_eq!(report.state.history()[0].text(), prompt);
        assert_eq!(session.active(), None);
        assert!(matches!(
            session.complete(at("2024-01-06T10:00:00Z")),
            Err(CoreError::NoActivePrompt)
        ));
    }

    #[test]
    fn generate_reports_unpersisted_selection() {
        let mut session = AdventureSession::new(
            StreakTracker::new(MemoryStore::with_quota(20)),
            vec!["Take a walk".to_string()],
        );
        let generated = session.generate().unwrap();

        assert_eq!(generated.prompt, "Take a walk");
        let warning = generated.warning.expect("selection should not fit the quota");
        assert_eq!(warning.key, "lastAdventureText");
        assert_eq!(session.active(), Some("Take a walk"));
        assert_eq!(session.state().last_adventure_text(), None);
    }

    #[test]
    fn resume_restores_active_prompt() {
        let mut first = session(&["Take a walk"]);
        first.generate().unwrap();
        let store = first.tracker.into_store();

        let resumed =
            AdventureSession::resume(StreakTracker::new(store), vec!["Take a walk".into()]);
        assert_eq!(resumed.active(), Some("Take a walk"));
    }

    #[test]
    fn share_message_formats_prompt_and_link() {
        let mut session = session(&["Take a walk"]);
        assert!(matches!(
            session.share_message("https://example.org"),
            Err(CoreError::NoActivePrompt)
        ));
        session.generate().unwrap();
        assert_eq!(
            session.share_message("https://example.org").unwrap(),
            "I just got this micro-adventure: \"Take a walk\"! Can you do it? https://example.org"
        );
        assert_eq!(
            session.share_message("").unwrap(),
            "I just got this micro-adventure: \"Take a walk\"! Can you do it?"
        );
    }
}
