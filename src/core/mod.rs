pub mod clock;
pub mod errors;
pub mod models;

pub use clock::{
    Clock,
    DayBoundary,
    FixedClock,
    SystemClock,
};
pub use errors::VocabError;
pub use models::{
    Difficulty,
    Vocabulary,
    VocabularyWord,
    WordDerivative,
    WordId,
};
