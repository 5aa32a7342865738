//! Persisted streak state and the completion transition.
//!
//! `PersistedState::complete` is pure: it decides the streak transition for
//! a completion at `now` and updates the history log. Reading and writing
//! the state lives in [`super::codec`].

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the history log.
pub const HISTORY_LIMIT: usize = 50;

/// One completed adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    text: String,
    timestamp: DateTime<FixedOffset>,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

/// What a completion did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreakTransition {
    /// First completion ever recorded.
    Started,
    /// Last completion was yesterday.
    Extended,
    /// Last completion was two or more days ago (or in the future).
    Reset { previous: u32 },
    /// Already completed today; the streak was left alone.
    AlreadyCountedToday,
}

impl StreakTransition {
    pub fn counted(&self) -> bool {
        !matches!(self, StreakTransition::AlreadyCountedToday)
    }
}

/// Everything the app keeps between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub(crate) streak: u32,
    pub(crate) last_completion_date: Option<NaiveDate>,
    pub(crate) last_adventure_text: Option<String>,
    pub(crate) history: Vec<HistoryEntry>,
}

impl PersistedState {
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_completion_date(&self) -> Option<NaiveDate> {
        self.last_completion_date
    }

    pub fn last_adventure_text(&self) -> Option<&str> {
        self.last_adventure_text.as_deref()
    }

    /// Completion log, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Whether a completion on `today` would still extend the streak.
    ///
    /// The stored streak is never decayed; this is a rendering hint only.
    pub fn streak_alive_on(&self, today: NaiveDate) -> bool {
        match self.last_completion_date {
            Some(last) => last == today || today.pred_opt() == Some(last),
            None => false,
        }
    }

    pub(crate) fn select(&mut self, text: &str) {
        self.last_adventure_text = Some(text.to_string());
    }

    /// Apply a completion of `text` at `now`.
    ///
    /// Only the first completion of a calendar day (in `now`'s offset) moves
    /// the streak; every completion is logged.
    pub fn complete(&mut self, text: &str, now: DateTime<FixedOffset>) -> StreakTransition {
        let today = now.date_naive();

        let transition = match self.last_completion_date {
            Some(last) if last == today => StreakTransition::AlreadyCountedToday,
            Some(last) if today.pred_opt() == Some(last) => StreakTransition::Extended,
            Some(_) => StreakTransition::Reset {
                previous: self.streak,
            },
            None => StreakTransition::Started,
        };

        match transition {
            StreakTransition::AlreadyCountedToday => {}
            StreakTransition::Extended => {
                self.streak = self.streak.saturating_add(1);
                self.last_completion_date = Some(today);
            }
            StreakTransition::Started | StreakTransition::Reset { .. } => {
                self.streak = 1;
                self.last_completion_date = Some(today);
            }
        }

        self.last_adventure_text = Some(text.to_string());
        self.history.insert(0, HistoryEntry::new(text, now));
        self.history.truncate(HISTORY_LIMIT);

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_with(streak: u32, last: NaiveDate) -> PersistedState {
        PersistedState {
            streak,
            last_completion_date: Some(last),
            ..Default::default()
        }
    }

    #[test]
    fn first_completion_starts_streak() {
        let mut state = PersistedState::default();
        let transition = state.complete("Take a walk", at(2024, 1, 6, 9));
        assert_eq!(transition, StreakTransition::Started);
        assert_eq!(state.streak(), 1);
        assert_eq!(state.last_completion_date(), Some(date(2024, 1, 6)));
        assert_eq!(state.last_adventure_text(), Some("Take a walk"));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn next_day_extends_streak() {
        let mut state = state_with(3, date(2024, 1, 5));
        let transition = state.complete("Take a walk", at(2024, 1, 6, 9));
        assert_eq!(transition, StreakTransition::Extended);
        assert_eq!(state.streak(), 4);
        assert_eq!(state.last_completion_date(), Some(date(2024, 1, 6)));
        assert_eq!(state.history()[0].text(), "Take a walk");
        assert_eq!(state.history()[0].timestamp(), at(2024, 1, 6, 9));
    }

    #[test]
    fn gap_resets_streak() {
        let mut state = state_with(3, date(2024, 1, 5));
        let transition = state.complete("Take a walk", at(2024, 1, 8, 9));
        assert_eq!(transition, StreakTransition::Reset { previous: 3 });
        assert_eq!(state.streak(), 1);
        assert_eq!(state.last_completion_date(), Some(date(2024, 1, 8)));
    }

    #[test]
    fn two_day_gap_resets_streak() {
        let mut state = state_with(9, date(2024, 1, 5));
        state.complete("Take a walk", at(2024, 1, 7, 0));
        assert_eq!(state.streak(), 1);
    }

    #[test]
    fn same_day_repeat_logs_without_counting() {
        let mut state = state_with(3, date(2024, 1, 5));
        state.complete("First", at(2024, 1, 6, 9));
        let transition = state.complete("Second", at(2024, 1, 6, 21));
        assert_eq!(transition, StreakTransition::AlreadyCountedToday);
        assert!(!transition.counted());
        assert_eq!(state.streak(), 4);
        assert_eq!(state.last_completion_date(), Some(date(2024, 1, 6)));
        assert_eq!(state.last_adventure_text(), Some("Second"));
        let texts: Vec<_> = state.history().iter().map(HistoryEntry::text).collect();
        assert_eq!(texts, vec!["Second", "First"]);
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        let mut state = state_with(10, date(2023, 12, 31));
        state.complete("New year walk", at(2024, 1, 1, 8));
        assert_eq!(state.streak(), 11);

        let mut leap = state_with(2, date(2024, 2, 28));
        leap.complete("Leap day", at(2024, 2, 29, 8));
        assert_eq!(leap.streak(), 3);
    }

    #[test]
    fn local_offset_decides_the_day() {
        // 23:30 at UTC-5 on Jan 6 is Jan 7 in UTC; the local date must win.
        let local = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 6, 23, 30, 0)
            .unwrap();
        let mut state = state_with(3, date(2024, 1, 5));
        state.complete("Night walk", local);
        assert_eq!(state.streak(), 4);
        assert_eq!(state.last_completion_date(), Some(date(2024, 1, 6)));
    }

    #[test]
    fn last_date_in_future_resets() {
        let mut state = state_with(5, date(2024, 3, 1));
        let transition = state.complete("Back in time", at(2024, 2, 1, 9));
        assert_eq!(transition, StreakTransition::Reset { previous: 5 });
        assert_eq!(state.streak(), 1);
        assert_eq!(state.last_completion_date(), Some(date(2024, 2, 1)));
    }

    #[test]
    fn history_keeps_fifty_most_recent() {
        let mut state = PersistedState::default();
        let start = at(2024, 1, 1, 0);
        for i in 0..60 {
            state.complete(&format!("adventure {i}"), start + Duration::hours(i));
        }
        assert_eq!(state.history().len(), HISTORY_LIMIT);
        assert_eq!(state.history()[0].text(), "adventure 59");
        assert_eq!(state.history()[49].text(), "adventure 10");
    }

    #[test]
    fn streak_alive_on_today_and_tomorrow_only() {
        let state = state_with(3, date(2024, 1, 5));
        assert!(state.streak_alive_on(date(2024, 1, 5)));
        assert!(state.streak_alive_on(date(2024, 1, 6)));
        assert!(!state.streak_alive_on(date(2024, 1, 7)));
        assert!(!PersistedState::default().streak_alive_on(date(2024, 1, 5)));
    }

    proptest! {
        #[test]
        fn same_day_completions_count_at_most_once(
            streak in 0u32..1000,
            last_offset in 0i64..10,
            hours in prop::collection::vec(0u32..24, 1..10),
        ) {
            let today = date(2024, 6, 15);
            let mut state = state_with(streak, today - Duration::days(last_offset));
            let before = state.streak();
            let history_before = state.history().len();
            for h in &hours {
                state.complete("again", at(2024, 6, 15, *h));
            }
            prop_assert!(state.streak() <= before + 1);
            prop_assert_eq!(state.history().len(), history_before + hours.len());
        }

        #[test]
        fn history_never_exceeds_limit(count in 0usize..120) {
            let mut state = PersistedState::default();
            let start = at(2024, 1, 1, 0);
            for i in 0..count {
                state.complete("step", start + Duration::minutes(i as i64));
            }
            prop_assert_eq!(state.history().len(), count.min(HISTORY_LIMIT));
            for pair in state.history().windows(2) {
                prop_assert!(pair[0].timestamp() >= pair[1].timestamp());
            }
        }
    }
}
