use std::{
    collections::{
        BTreeMap,
        HashSet,
    },
    fs,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::VocabError;

pub type WordId = u32;

pub const DEFAULT_LANGUAGE: &str = "en";

const BUILTIN_VOCABULARY: &str = include_str!("../../data/vocabulary.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDerivative {
    pub arabic: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: WordId,
    pub arabic: String,
    pub transliteration: String,
    pub part_of_speech: String,
    pub meanings: BTreeMap<String, String>, // language code -> meaning
    #[serde(default)]
    pub example_verse_arabic: String,
    #[serde(default)]
    pub example_verse_transliteration: String,
    #[serde(default)]
    pub example_verse_translations: BTreeMap<String, String>,
    #[serde(default)]
    pub verse_reference: String,
    pub frequency: u32, // occurrences in the Quranic corpus
    pub difficulty: Difficulty,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub etymology: Option<String>,
    #[serde(default)]
    pub derivatives: Vec<WordDerivative>,
}

impl VocabularyWord {
    /// Meaning in `language`, falling back to English and then to the transliteration.
    pub fn meaning(&self, language: &str) -> &str {
        self.meanings
            .get(language)
            .or_else(|| self.meanings.get(DEFAULT_LANGUAGE))
            .map(String::as_str)
            .unwrap_or(&self.transliteration)
    }

    pub fn example_translation(&self, language: &str) -> Option<&str> {
        self.example_verse_translations
            .get(language)
            .or_else(|| self.example_verse_translations.get(DEFAULT_LANGUAGE))
            .map(String::as_str)
    }
}

/// The full word list, in catalogue order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<VocabularyWord>,
}

impl Vocabulary {
    pub fn new(words: Vec<VocabularyWord>) -> Result<Self, VocabError> {
        let mut seen = HashSet::new();
        for word in &words {
            if !seen.insert(word.id) {
                return Err(VocabError::DuplicateWordId(word.id));
            }
            if word.frequency == 0 {
                return Err(VocabError::ZeroFrequency(word.id));
            }
        }
        Ok(Self { words })
    }

    pub fn from_json(json: &str) -> Result<Self, VocabError> {
        let words: Vec<VocabularyWord> = serde_json::from_str(json)?;
        Self::new(words)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, VocabError> {
        let json = fs::read_to_string(path)?;
        let vocabulary = Self::from_json(&json)?;
        tracing::info!(words = vocabulary.len(), path = %path.display(), "loaded vocabulary");
        Ok(vocabulary)
    }

    pub fn builtin() -> Result<Self, VocabError> {
        Self::from_json(BUILTIN_VOCABULARY)
    }

    pub fn words(&self) -> &[VocabularyWord] {
        &self.words
    }

    pub fn get(&self, id: WordId) -> Option<&VocabularyWord> {
        self.words.iter().find(|word| word.id == id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
