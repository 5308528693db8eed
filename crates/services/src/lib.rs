#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod sessions;

pub use sessions as session;

pub use config::{ReselectPolicy, SessionConfig};
pub use error::SessionError;

pub use sessions::{
    OptionState, OptionView, QuestionView, QuizResult, QuizSession, SelectionOutcome, Session,
    SessionProgress, Stage,
};
