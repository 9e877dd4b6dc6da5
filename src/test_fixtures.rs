use std::collections::BTreeMap;

use chrono::{
    DateTime,
    TimeZone,
    Utc,
};

use crate::core::{
    Difficulty,
    VocabularyWord,
    WordId,
};

/// Midnight UTC on the given date.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn word(id: WordId, meaning: &str, frequency: u32) -> VocabularyWord {
    VocabularyWord {
        id,
        arabic: format!("كلمة{}", id),
        transliteration: format!("kalima-{}", id),
        part_of_speech: "Noun".to_string(),
        meanings: BTreeMap::from([("en".to_string(), meaning.to_string())]),
        example_verse_arabic: String::new(),
        example_verse_transliteration: String::new(),
        example_verse_translations: BTreeMap::new(),
        verse_reference: String::new(),
        frequency,
        difficulty: Difficulty::Beginner,
        root: None,
        etymology: None,
        derivatives: Vec::new(),
    }
}

/// Words 1..=count with distinct meanings.
pub fn words(count: u32) -> Vec<VocabularyWord> {
    (1..=count).map(|id| word(id, &format!("meaning {}", id), id * 10)).collect()
}
