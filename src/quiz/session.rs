use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::error::{QuizError, StoreResult};
use crate::quiz::attempt::{AttemptRecorder, QuizAttempt, percentage};
use crate::quiz::choices::generate_choices;
use crate::quiz::pool::DistractorPool;
use crate::store::kv::KeyValueStore;
use crate::vocab::VocabularyEntry;

/// Fewest favourites a quiz can be started with.
pub const MIN_QUESTIONS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAnswer,
    Answered,
}

/// What the user picked for the current question, kept until `advance`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: String,
    pub correct: bool,
    pub correct_word: String,
}

#[derive(Debug)]
pub enum Progress {
    Next,
    Completed(CompletedQuiz),
}

/// Final result of a session. The score stands even if saving failed.
#[derive(Debug)]
pub struct CompletedQuiz {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub saved: StoreResult<Option<QuizAttempt>>,
}

struct ActiveQuiz {
    questions: Vec<VocabularyEntry>,
    current_index: usize,
    score: u32,
    choices: Vec<String>,
    answer: Option<AnswerFeedback>,
}

impl ActiveQuiz {
    fn current(&self) -> &VocabularyEntry {
        &self.questions[self.current_index]
    }
}

/// Runs one quiz at a time over a snapshot of the user's favourites.
///
/// Answering and moving on are separate steps so the caller can show
/// feedback in between; a second answer to the same question is rejected.
/// Finishing the last question records the attempt and returns to idle.
pub struct QuizEngine<S: KeyValueStore> {
    pool: DistractorPool,
    choice_count: usize,
    rng: SmallRng,
    recorder: AttemptRecorder<S>,
    session: Option<ActiveQuiz>,
}

impl<S: KeyValueStore> QuizEngine<S> {
    pub fn new(
        pool: DistractorPool,
        choice_count: usize,
        rng: SmallRng,
        recorder: AttemptRecorder<S>,
    ) -> Self {
        Self {
            pool,
            choice_count,
            rng,
            recorder,
            session: None,
        }
    }

    pub fn start(&mut self, favourites: &[VocabularyEntry]) -> Result<(), QuizError> {
        if self.session.is_some() {
            return Err(QuizError::SessionInProgress);
        }
        if favourites.is_empty() {
            return Err(QuizError::InsufficientFavourites);
        }
        if favourites.len() < MIN_QUESTIONS {
            return Err(QuizError::InsufficientChoicePool {
                have: favourites.len(),
                need: MIN_QUESTIONS,
            });
        }

        let mut questions = favourites.to_vec();
        questions.shuffle(&mut self.rng);
        let choices = generate_choices(
            &questions[0],
            self.pool.words(),
            self.choice_count,
            &mut self.rng,
        );

        debug!("quiz started with {} questions", questions.len());
        self.session = Some(ActiveQuiz {
            questions,
            current_index: 0,
            score: 0,
            choices,
            answer: None,
        });
        Ok(())
    }

    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerFeedback, QuizError> {
        let active = self.session.as_mut().ok_or(QuizError::NoActiveSession)?;
        if active.answer.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }

        let question = active.current();
        let feedback = AnswerFeedback {
            selected: choice.to_string(),
            correct: question.matches_word(choice),
            correct_word: question.word.clone(),
        };
        if feedback.correct {
            active.score += 1;
        }
        debug!(
            "question {} answered {}",
            active.current_index + 1,
            if feedback.correct { "correctly" } else { "incorrectly" }
        );
        active.answer = Some(feedback.clone());
        Ok(feedback)
    }

    pub fn advance(&mut self) -> Result<Progress, QuizError> {
        let active = self.session.as_mut().ok_or(QuizError::NoActiveSession)?;
        if active.answer.is_none() {
            return Err(QuizError::NotAnswered);
        }

        if active.current_index + 1 < active.questions.len() {
            active.current_index += 1;
            active.answer = None;
            active.choices = generate_choices(
                &active.questions[active.current_index],
                self.pool.words(),
                self.choice_count,
                &mut self.rng,
            );
            return Ok(Progress::Next);
        }

        let Some(finished) = self.session.take() else {
            return Err(QuizError::NoActiveSession);
        };
        let total = finished.questions.len() as u32;
        debug!("quiz completed: {}/{}", finished.score, total);
        let saved = self.recorder.record(finished.score, total);
        Ok(Progress::Completed(CompletedQuiz {
            score: finished.score,
            total_questions: total,
            percentage: percentage(finished.score, total),
            saved,
        }))
    }

    /// Drop the running session without recording anything.
    pub fn abandon(&mut self) -> Result<(), QuizError> {
        match self.session.take() {
            Some(active) => {
                debug!(
                    "quiz abandoned at question {}/{}",
                    active.current_index + 1,
                    active.questions.len()
                );
                Ok(())
            }
            None => Err(QuizError::NoActiveSession),
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Idle,
            Some(active) if active.answer.is_some() => Phase::Answered,
            Some(_) => Phase::AwaitingAnswer,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_question(&self) -> Option<&VocabularyEntry> {
        self.session.as_ref().map(|a| a.current())
    }

    pub fn choices(&self) -> &[String] {
        self.session
            .as_ref()
            .map(|a| a.choices.as_slice())
            .unwrap_or(&[])
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.session.as_ref().and_then(|a| a.answer.as_ref())
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |a| a.score)
    }

    /// 1-based position of the current question, 0 when idle.
    pub fn question_number(&self) -> usize {
        self.session.as_ref().map_or(0, |a| a.current_index + 1)
    }

    pub fn total_questions(&self) -> usize {
        self.session.as_ref().map_or(0, |a| a.questions.len())
    }

    pub fn recorder(&self) -> &AttemptRecorder<S> {
        &self.recorder
    }
}
