use thiserror::Error;

/// Failures raised by the quiz session state machine.
///
/// The first two are user-correctable and should be shown as a blocking
/// message. The rest are guards against out-of-order UI events and are meant
/// to be swallowed, not displayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("no favourite words yet; add some words to your favourites to start a quiz")]
    InsufficientFavourites,

    #[error("not enough words for a quiz: need at least {need} favourites, have {have}")]
    InsufficientChoicePool { have: usize, need: usize },

    #[error("the current question has already been answered")]
    AlreadyAnswered,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("no quiz session is active")]
    NoActiveSession,

    #[error("a quiz session is already in progress")]
    SessionInProgress,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
