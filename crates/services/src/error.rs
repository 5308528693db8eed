//! Shared error types for the services crate.

use thiserror::Error;

use crate::sessions::Stage;

/// Errors emitted by `QuizSession`.
///
/// Every variant is recoverable: the session is left exactly as it was before
/// the rejected call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("option {option} is out of range, questions have {options} options")]
    InvalidArgument { option: usize, options: usize },
    #[error("cannot {operation} while {stage}")]
    InvalidState {
        operation: &'static str,
        stage: Stage,
    },
}
