use chrono::{DateTime, SecondsFormat, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::store::history::HistoryStore;
use crate::store::kv::KeyValueStore;

/// Summary of one completed quiz, as persisted in the history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: String,
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
}

impl QuizAttempt {
    /// Returns None for an empty quiz.
    pub fn new(score: u32, total_questions: u32, date: DateTime<Utc>) -> Option<Self> {
        if total_questions == 0 {
            return None;
        }
        Some(Self {
            id: date.to_rfc3339_opts(SecondsFormat::Nanos, true),
            date,
            score,
            total_questions,
            percentage: percentage(score, total_questions),
        })
    }
}

pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * score as f64 / total as f64
}

/// Turns finished sessions into history records.
pub struct AttemptRecorder<S: KeyValueStore> {
    history: HistoryStore<S>,
}

impl<S: KeyValueStore> AttemptRecorder<S> {
    pub fn new(history: HistoryStore<S>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// Builds and appends an attempt stamped with the current time.
    /// `Ok(None)` means the session was empty and nothing was written.
    pub fn record(&mut self, score: u32, total: u32) -> StoreResult<Option<QuizAttempt>> {
        let Some(attempt) = QuizAttempt::new(score, total, Utc::now()) else {
            return Ok(None);
        };
        match self.history.append(attempt.clone()) {
            Ok(()) => {
                info!(
                    "quiz attempt saved: {}/{} ({:.1}%)",
                    attempt.score, attempt.total_questions, attempt.percentage
                );
                Ok(Some(attempt))
            }
            Err(e) => {
                error!("failed to save quiz attempt: {e}");
                Err(e)
            }
        }
    }
}
