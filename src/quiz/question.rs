use std::collections::BTreeSet;

use rand::{
    seq::SliceRandom,
    Rng,
};
use serde::Serialize;

use crate::core::{
    VocabularyWord,
    WordId,
};

pub const DISTRACTORS_PER_QUESTION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub word_id: WordId,
    pub prompt: String, // Arabic form
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// One multiple-choice question per word, asking for its meaning in `language`.
///
/// Distractors come from the whole vocabulary, so a session over few words
/// still gets a full set of options.
pub fn generate_questions<R: Rng + ?Sized>(
    words: &[VocabularyWord],
    vocabulary: &[VocabularyWord],
    language: &str,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let all_meanings: BTreeSet<&str> = vocabulary.iter().map(|w| w.meaning(language)).collect();

    words
        .iter()
        .map(|word| {
            let correct_answer = word.meaning(language);

            let mut wrong_answers: Vec<&str> =
                all_meanings.iter().copied().filter(|m| *m != correct_answer).collect();
            wrong_answers.shuffle(rng);
            wrong_answers.truncate(DISTRACTORS_PER_QUESTION);

            let mut options: Vec<String> = wrong_answers.into_iter().map(str::to_string).collect();
            options.push(correct_answer.to_string());
            options.shuffle(rng);

            QuizQuestion {
                word_id: word.id,
                prompt: word.arabic.clone(),
                options,
                correct_answer: correct_answer.to_string(),
            }
        })
        .collect()
}
