//! Vocabulary learning for Quranic Arabic: spaced repetition scheduling,
//! multiple-choice quizzes and learner progress.

pub mod core;
pub mod learner;
pub mod logging;
pub mod persistence;
pub mod quiz;
pub mod settings;
pub mod srs;

#[cfg(test)]
mod test_fixtures;

pub use crate::core::{
    Clock,
    DayBoundary,
    VocabError,
    Vocabulary,
    VocabularyWord,
    WordId,
};
pub use learner::LearnerProfile;
pub use settings::Settings;
pub use srs::{
    SrsPolicy,
    SrsRecord,
    SrsStore,
};
