use rand::{
    seq::SliceRandom,
    Rng,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::core::VocabularyWord;

pub const MIN_QUIZ_WORDS: usize = 4;
pub const PRACTICE_SESSION_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    /// Words whose review day has arrived.
    Review,
    /// Random learned words, used when nothing is due.
    Practice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub min_words: usize,
    pub practice_size: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self { min_words: MIN_QUIZ_WORDS, practice_size: PRACTICE_SESSION_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSelection<'a> {
    pub words: Vec<&'a VocabularyWord>,
    pub kind: SessionKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizRefusal {
    #[error(
        "You need at least {required} words marked as learned (or due for review) to start a quiz, found {available}"
    )]
    NotEnoughWords { available: usize, required: usize },
}

/// Picks the words for the next quiz.
///
/// Due words always make up the whole session when there are any. Otherwise
/// up to `practice_size` learned words are sampled without replacement.
pub fn select_quiz_candidates<'a, R: Rng + ?Sized>(
    due: &[&'a VocabularyWord],
    learned: &[&'a VocabularyWord],
    limits: &SelectionLimits,
    rng: &mut R,
) -> Result<QuizSelection<'a>, QuizRefusal> {
    // due words are a subset of learned words
    let available = due.len().max(learned.len());
    if available < limits.min_words {
        return Err(QuizRefusal::NotEnoughWords { available, required: limits.min_words });
    }

    if !due.is_empty() {
        return Ok(QuizSelection { words: due.to_vec(), kind: SessionKind::Review });
    }

    let mut words = learned.to_vec();
    words.shuffle(rng);
    words.truncate(limits.practice_size);
    Ok(QuizSelection { words, kind: SessionKind::Practice })
}
