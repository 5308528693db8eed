mod progress;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{QuizSession, SelectionOutcome, Session, Stage};
pub use view::{OptionState, OptionView, QuestionView, QuizResult};
