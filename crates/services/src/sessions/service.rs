use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use quiz_core::model::{OPTION_COUNT, Question, Quiz};

use super::progress::SessionProgress;
use super::view::{QuestionView, QuizResult};
use crate::config::{ReselectPolicy, SessionConfig};
use crate::error::SessionError;

//
// ─── STAGE ─────────────────────────────────────────────────────────────────────
//

/// Where a playthrough currently stands.
///
/// `Answering` and `Feedback` carry the 0-based question index; which of the
/// two applies depends only on whether that question has an answer recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Welcome,
    Answering(usize),
    Feedback(usize),
    Finished,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Welcome => f.write_str("on the welcome screen"),
            Stage::Answering(i) => write!(f, "answering question {}", i + 1),
            Stage::Feedback(i) => write!(f, "showing feedback for question {}", i + 1),
            Stage::Finished => f.write_str("finished"),
        }
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Mutable state of one playthrough.
///
/// Only `QuizSession` can change it. Two sessions compare equal when every
/// field matches, including the internal set of already-scored questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    current_index: usize,
    selected_answers: Vec<Option<usize>>,
    score: usize,
    finished: bool,
    scored: BTreeSet<usize>,
}

impl Session {
    /// A session that has not answered anything yet.
    #[must_use]
    pub fn fresh(question_count: usize) -> Self {
        Self {
            current_index: 0,
            selected_answers: vec![None; question_count],
            score: 0,
            finished: false,
            scored: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// One slot per question; `None` means unanswered.
    #[must_use]
    pub fn selected_answers(&self) -> &[Option<usize>] {
        &self.selected_answers
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn answer(&self, index: usize) -> Option<usize> {
        self.selected_answers.get(index).copied().flatten()
    }
}

//
// ─── SELECTION OUTCOME ─────────────────────────────────────────────────────────
//

/// What a call to [`QuizSession::select_option`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub question_index: usize,
    pub option: usize,
    pub is_correct: bool,
    /// `true` only when this call incremented the score.
    pub scored: bool,
    /// `true` when an earlier answer for the same question was overwritten.
    pub rerecorded: bool,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one playthrough of a quiz and is the only place scores change.
///
/// Legal path: `start` → (`select_option` → `advance`) per question → finished,
/// `restart` back to the welcome screen. A question contributes to the score at
/// most once for the lifetime of a session, however often it is answered.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use quiz_core::catalog::fixture_quiz;
/// # use services::{QuizSession, Stage};
/// let mut quiz = QuizSession::new(Arc::new(fixture_quiz(&[1, 2])));
/// quiz.start();
///
/// quiz.select_option(1)?;
/// quiz.advance()?;
/// quiz.select_option(0)?;
/// assert_eq!(quiz.advance()?, Stage::Finished);
///
/// let result = quiz.result()?;
/// assert_eq!(result.score, 1);
/// # Ok::<(), services::SessionError>(())
/// ```
pub struct QuizSession {
    quiz: Arc<Quiz>,
    config: SessionConfig,
    session: Session,
    started: bool,
}

impl QuizSession {
    /// Create a session on the welcome screen with the default configuration.
    #[must_use]
    pub fn new(quiz: Arc<Quiz>) -> Self {
        Self::with_config(quiz, SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(quiz: Arc<Quiz>, config: SessionConfig) -> Self {
        if !config.ranks.fits(quiz.len()) {
            warn!(
                "absolute rank table does not fit quiz {} with {} questions",
                quiz.id(),
                quiz.len()
            );
        }

        let session = Session::fresh(quiz.len());
        Self {
            quiz,
            config,
            session,
            started: false,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &Arc<Quiz> {
        &self.quiz
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        if !self.started {
            Stage::Welcome
        } else if self.session.finished {
            Stage::Finished
        } else if self.session.answer(self.session.current_index).is_some() {
            Stage::Feedback(self.session.current_index)
        } else {
            Stage::Answering(self.session.current_index)
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.session.score
    }

    #[must_use]
    pub fn selected_answers(&self) -> &[Option<usize>] {
        &self.session.selected_answers
    }

    /// The question on screen, if a question is on screen.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.stage() {
            Stage::Answering(i) | Stage::Feedback(i) => self.quiz.question(i),
            Stage::Welcome | Stage::Finished => None,
        }
    }

    /// Progress while a question is on screen.
    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        match self.stage() {
            Stage::Answering(i) | Stage::Feedback(i) => Some(SessionProgress {
                position: i + 1,
                total: self.quiz.len(),
                score: self.session.score,
            }),
            Stage::Welcome | Stage::Finished => None,
        }
    }

    /// Per-option display state for the question on screen.
    ///
    /// `pending` is an option the front end has highlighted but not confirmed;
    /// it only shows while the question is unanswered.
    #[must_use]
    pub fn question_view(&self, pending: Option<usize>) -> Option<QuestionView<'_>> {
        let index = match self.stage() {
            Stage::Answering(i) | Stage::Feedback(i) => i,
            Stage::Welcome | Stage::Finished => return None,
        };
        let question = self.quiz.question(index)?;
        Some(QuestionView::build(
            question,
            index,
            self.quiz.len(),
            self.session.answer(index),
            pending,
        ))
    }

    /// Final score and rank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the quiz is finished.
    pub fn result(&self) -> Result<QuizResult, SessionError> {
        match self.stage() {
            Stage::Finished => Ok(QuizResult {
                score: self.session.score,
                total: self.quiz.len(),
                rank: self.config.ranks.rank(self.session.score, self.quiz.len()),
            }),
            stage => Err(SessionError::InvalidState {
                operation: "show results",
                stage,
            }),
        }
    }

    /// Begin a fresh playthrough at the first question. Legal from any stage.
    pub fn start(&mut self) {
        self.session = Session::fresh(self.quiz.len());
        self.started = true;
        debug!("quiz {} started", self.quiz.id());
    }

    /// Record an answer for the question on screen.
    ///
    /// The score goes up by one only if the question had no answer before this
    /// call, has never been scored, and `option` is the correct one.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `option` does not address one of the options
    /// - `InvalidState` outside a question, or when the question is already
    ///   answered and the policy is [`ReselectPolicy::Reject`]
    pub fn select_option(&mut self, option: usize) -> Result<SelectionOutcome, SessionError> {
        if option >= OPTION_COUNT {
            return Err(SessionError::InvalidArgument {
                option,
                options: OPTION_COUNT,
            });
        }

        let index = match self.stage() {
            Stage::Answering(i) => i,
            Stage::Feedback(i) if self.config.reselect == ReselectPolicy::Rerecord => i,
            stage => {
                return Err(SessionError::InvalidState {
                    operation: "select an option",
                    stage,
                });
            }
        };

        let is_correct = self
            .quiz
            .question(index)
            .is_some_and(|question| question.is_correct(option));

        let was_answered = self.session.answer(index).is_some();
        self.session.selected_answers[index] = Some(option);

        let scored = !was_answered && is_correct && self.session.scored.insert(index);
        if scored {
            self.session.score += 1;
        }

        debug!(
            "question {} answered with option {option} (correct: {is_correct}, scored: {scored})",
            index + 1
        );

        Ok(SelectionOutcome {
            question_index: index,
            option,
            is_correct,
            scored,
            rerecorded: was_answered,
        })
    }

    /// Move past the feedback for the current question.
    ///
    /// Returns the new stage: the next question, or `Finished` after the last.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless feedback is showing.
    pub fn advance(&mut self) -> Result<Stage, SessionError> {
        match self.stage() {
            Stage::Feedback(i) if i + 1 < self.quiz.len() => {
                self.session.current_index = i + 1;
                Ok(self.stage())
            }
            Stage::Feedback(_) => {
                self.session.finished = true;
                info!(
                    "quiz {} finished with {}/{}",
                    self.quiz.id(),
                    self.session.score,
                    self.quiz.len()
                );
                Ok(Stage::Finished)
            }
            stage => Err(SessionError::InvalidState {
                operation: "advance",
                stage,
            }),
        }
    }

    /// Throw away the playthrough and return to the welcome screen. Legal from
    /// any stage.
    pub fn restart(&mut self) {
        self.session = Session::fresh(self.quiz.len());
        self.started = false;
        debug!("quiz {} restarted", self.quiz.id());
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", self.quiz.id())
            .field("questions_len", &self.quiz.len())
            .field("stage", &self.stage())
            .field("score", &self.session.score)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
