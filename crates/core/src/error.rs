use thiserror::Error;

use crate::model::{QuestionError, QuizError};
use crate::rank::RankTableError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    RankTable(#[from] RankTableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_errors_convert_and_keep_their_message() {
        let err: Error = QuestionError::CorrectIndexOutOfRange { index: 4 }.into();
        assert!(matches!(err, Error::Question(_)));

        let err: Error = QuizError::NoQuestions.into();
        assert!(matches!(err, Error::Quiz(QuizError::NoQuestions)));
        assert_eq!(err.to_string(), QuizError::NoQuestions.to_string());

        let err: Error = RankTableError::PercentOutOfRange { provided: 120 }.into();
        assert!(matches!(
            err,
            Error::RankTable(RankTableError::PercentOutOfRange { provided: 120 })
        ));
    }
}
