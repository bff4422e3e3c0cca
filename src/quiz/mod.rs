pub mod attempt;
pub mod choices;
pub mod pool;
pub mod session;

pub use attempt::{AttemptRecorder, QuizAttempt};
pub use session::{AnswerFeedback, CompletedQuiz, Phase, Progress, QuizEngine};
