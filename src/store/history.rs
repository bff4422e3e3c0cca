use log::warn;

use crate::error::StoreResult;
use crate::quiz::attempt::QuizAttempt;
use crate::store::kv::KeyValueStore;

pub const HISTORY_KEY: &str = "quizAnalyticsData";

/// Append-only quiz history kept as one JSON array under [`HISTORY_KEY`].
///
/// Every append is a read-modify-write of the whole array with no locking,
/// so two stores appending to the same backend concurrently can lose an
/// attempt. The session engine only ever runs one quiz at a time.
pub struct HistoryStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Attempts in storage (insertion) order. Read or parse failures are
    /// logged and treated as no history.
    pub fn load(&self) -> Vec<QuizAttempt> {
        let raw = match self.kv.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read quiz history: {e}");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("discarding unparseable quiz history: {e}");
            Vec::new()
        })
    }

    pub fn append(&mut self, attempt: QuizAttempt) -> StoreResult<()> {
        let mut attempts = self.load();
        attempts.push(attempt);
        let json = serde_json::to_string(&attempts)?;
        self.kv.set(HISTORY_KEY, &json)
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        self.kv.remove(HISTORY_KEY)
    }

    pub fn load_sorted(&self) -> Vec<QuizAttempt> {
        sorted_by_date_descending(&self.load())
    }
}

/// Most recent first. Ties keep their stored order.
pub fn sorted_by_date_descending(history: &[QuizAttempt]) -> Vec<QuizAttempt> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
