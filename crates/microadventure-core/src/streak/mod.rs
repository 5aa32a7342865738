mod codec;
mod state;
mod tracker;

pub use state::{HistoryEntry, PersistedState, StreakTransition, HISTORY_LIMIT};
pub use tracker::{CompletionReport, StreakTracker};
