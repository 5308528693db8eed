mod ids;
mod question;
mod quiz;

pub use ids::{ParseIdError, QuestionId, QuizId};

pub use question::{OPTION_COUNT, Question, QuestionDraft, QuestionError};
pub use quiz::{Quiz, QuizDraft, QuizError};
