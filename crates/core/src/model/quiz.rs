use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuizId;
use crate::model::question::{Question, QuestionDraft, QuestionError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz id cannot be empty")]
    EmptyId,

    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("question id `{id}` appears more than once")]
    DuplicateQuestionId { id: String },

    #[error("question {index} is invalid: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── QUIZ DRAFT ────────────────────────────────────────────────────────────────
//

/// Authoring shape of a weekly quiz edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub id: QuizId,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

impl QuizDraft {
    /// Validate every question and the quiz-level invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Question` for the first invalid question, or the
    /// quiz-level variant that failed.
    pub fn validate(self) -> Result<Quiz, QuizError> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| QuizError::Question { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Quiz::new(self.id, self.title, self.description, questions)
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// One weekly edition: metadata plus an ordered, non-empty list of questions.
///
/// Never mutated after construction. Starting a different week means building a
/// new `Quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuizDraft", into = "QuizDraft")]
pub struct Quiz {
    id: QuizId,
    title: String,
    description: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// - `EmptyId` / `EmptyTitle` for blank metadata
    /// - `NoQuestions` if `questions` is empty
    /// - `DuplicateQuestionId` if two questions share an id
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        let title = title.into();
        if id.is_blank() {
            return Err(QuizError::EmptyId);
        }
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuizError::DuplicateQuestionId {
                    id: question.id().to_string(),
                });
            }
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuizId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`: construction rejects empty quizzes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl TryFrom<QuizDraft> for Quiz {
    type Error = QuizError;

    fn try_from(draft: QuizDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<Quiz> for QuizDraft {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            questions: quiz.questions.into_iter().map(QuestionDraft::from).collect(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> Question {
        Question::new(id, "Prompt?", ["a", "b", "c", "d"], correct, "Because.", None).unwrap()
    }

    #[test]
    fn quiz_keeps_question_order() {
        let quiz = Quiz::new(
            QuizId::new("2025-11-24"),
            "Week of 24 November 2025",
            "",
            vec![question("q1", 0), question("q2", 3)],
        )
        .unwrap();

        assert_eq!(quiz.len(), 2);
        assert!(!quiz.is_empty());
        assert_eq!(quiz.question(1).unwrap().id().as_str(), "q2");
        assert!(quiz.question(2).is_none());
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = Quiz::new(QuizId::new("w"), "Week", "", Vec::new()).unwrap_err();
        assert_eq!(err, QuizError::NoQuestions);
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let err = Quiz::new(
            QuizId::new("w"),
            "Week",
            "",
            vec![question("q1", 0), question("q1", 1)],
        )
        .unwrap_err();
        assert_eq!(err, QuizError::DuplicateQuestionId { id: "q1".into() });
    }

    #[test]
    fn blank_metadata_is_rejected() {
        let err = Quiz::new(QuizId::new(" "), "Week", "", vec![question("q1", 0)]).unwrap_err();
        assert_eq!(err, QuizError::EmptyId);

        let err = Quiz::new(QuizId::new("w"), "", "", vec![question("q1", 0)]).unwrap_err();
        assert_eq!(err, QuizError::EmptyTitle);
    }

    #[test]
    fn draft_reports_index_of_invalid_question() {
        let mut bad: QuestionDraft = question("q2", 0).into();
        bad.correct_option_index = 9;
        let draft = QuizDraft {
            id: QuizId::new("w"),
            title: "Week".into(),
            description: String::new(),
            questions: vec![question("q1", 0).into(), bad],
        };

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err,
            QuizError::Question {
                index: 1,
                source: QuestionError::CorrectIndexOutOfRange { index: 9 },
            }
        );
    }

    #[test]
    fn quiz_json_round_trips_through_draft_shape() {
        let quiz = Quiz::new(QuizId::new("w"), "Week", "desc", vec![question("q1", 2)]).unwrap();
        let json = serde_json::to_value(&quiz).unwrap();
        assert_eq!(json["questions"][0]["correctIndex"], 2);
        assert_eq!(json["questions"][0]["question"], "Prompt?");

        let back: Quiz = serde_json::from_value(json).unwrap();
        assert_eq!(back, quiz);
    }
}
