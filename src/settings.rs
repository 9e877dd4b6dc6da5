use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        models::DEFAULT_LANGUAGE,
        DayBoundary,
        VocabError,
    },
    persistence::{
        load_json_or_default,
        save_json,
        KeyValueStore,
    },
    quiz::{
        SelectionLimits,
        MIN_QUIZ_WORDS,
        PRACTICE_SESSION_SIZE,
    },
    srs::{
        IntervalTable,
        SrsPolicy,
    },
};

pub const SETTINGS_KEY: &str = "settings";

/// Total word occurrences in the Quranic corpus, the denominator of learning progress.
pub const CORPUS_TOTAL_FREQUENCY: u64 = 77_430;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub intervals: IntervalTable,
    pub day_boundary: DayBoundary,
    pub min_quiz_words: usize,
    pub practice_session_size: usize,
    pub quiz_language: String,
    pub corpus_total_frequency: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intervals: IntervalTable::default(),
            day_boundary: DayBoundary::default(),
            min_quiz_words: MIN_QUIZ_WORDS,
            practice_session_size: PRACTICE_SESSION_SIZE,
            quiz_language: DEFAULT_LANGUAGE.to_string(),
            corpus_total_frequency: CORPUS_TOTAL_FREQUENCY,
        }
    }
}

impl Settings {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let settings: Settings = load_json_or_default(store, SETTINGS_KEY);
        if !settings.intervals.is_monotonic() {
            tracing::warn!(
                intervals = ?settings.intervals.as_slice(),
                "review intervals are not in increasing order"
            );
        }
        settings
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), VocabError> {
        save_json(store, SETTINGS_KEY, self)
    }

    pub fn policy(&self) -> SrsPolicy {
        SrsPolicy::new(self.intervals.clone(), self.day_boundary)
    }

    pub fn selection_limits(&self) -> SelectionLimits {
        SelectionLimits {
            min_words: self.min_quiz_words.max(1),
            practice_size: self.practice_session_size.max(1),
        }
    }
}
