use thiserror::Error;

use super::models::WordId;
use crate::quiz::{
    QuizError,
    QuizRefusal,
};

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate word id {0} in vocabulary")]
    DuplicateWordId(WordId),

    #[error("Word {0} has a frequency of zero")]
    ZeroFrequency(WordId),

    #[error("Unknown word id: {0}")]
    UnknownWord(WordId),

    #[error("Interval table must contain at least one entry")]
    EmptyIntervalTable,

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Refused(#[from] QuizRefusal),

    #[error("VocabError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for VocabError {
    fn from(error: std::io::Error) -> Self {
        VocabError::Io(Box::new(error))
    }
}
