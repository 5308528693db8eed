use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have exactly 4 options, got {len}")]
    OptionCount { len: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct option index must be below 4, got {index}")]
    CorrectIndexOutOfRange { index: usize },
}

//
// ─── QUESTION DRAFT ────────────────────────────────────────────────────────────
//

/// Authoring shape of a question, as written in quiz files.
///
/// Field names follow the newsletter tooling (`question`, `correctIndex`,
/// `sourceLabel`); `prompt` is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: QuestionId,
    #[serde(rename = "question", alias = "prompt")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct_option_index: usize,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

impl QuestionDraft {
    /// Check the draft and turn it into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// - `EmptyId` / `EmptyPrompt` for blank text
    /// - `OptionCount` unless exactly [`OPTION_COUNT`] options are present
    /// - `EmptyOption` for a blank option
    /// - `CorrectIndexOutOfRange` if the index does not address an option
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.id.is_blank() {
            return Err(QuestionError::EmptyId);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let len = self.options.len();
        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { len })?;

        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if self.correct_option_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_option_index,
            });
        }

        let source_label = self
            .source_label
            .map(|label| label.trim().to_owned())
            .filter(|label| !label.is_empty());

        Ok(Question {
            id: self.id,
            prompt: self.prompt,
            options,
            correct_option_index: self.correct_option_index,
            explanation: self.explanation,
            source_label,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft", into = "QuestionDraft")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_option_index: usize,
    explanation: String,
    source_label: Option<String>,
}

impl Question {
    /// Build a question from its parts.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_option_index: usize,
        explanation: impl Into<String>,
        source_label: Option<&str>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct_option_index,
            explanation: explanation.into(),
            source_label: source_label.map(str::to_owned),
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn source_label(&self) -> Option<&str> {
        self.source_label.as_deref()
    }
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<Question> for QuestionDraft {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            prompt: question.prompt,
            options: question.options.into(),
            correct_option_index: question.correct_option_index,
            explanation: question.explanation,
            source_label: question.source_label,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
