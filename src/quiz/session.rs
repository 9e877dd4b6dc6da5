use std::collections::HashMap;

use rand::{
    seq::SliceRandom,
    Rng,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::{
    generate_questions,
    QuizQuestion,
    QuizSelection,
    SessionKind,
};
use crate::core::{
    VocabularyWord,
    WordId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    InProgress,
    Finished,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Quiz has already been started")]
    AlreadyStarted,

    #[error("Quiz is not in progress")]
    NotInProgress,

    #[error("Word {0} is not part of this quiz")]
    NotInQuiz(WordId),

    #[error("Word {0} has already been answered")]
    AlreadyAnswered(WordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: String,
    pub finished: bool,
}

/// Outcome of a finished session, ready for the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub correct: Vec<WordId>,
    pub incorrect: Vec<WordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mistake {
    pub word_id: WordId,
    pub prompt: String,
    pub given_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: f32,
    pub mistakes: Vec<Mistake>,
}

/// A single quiz run: `Idle -> InProgress -> Finished`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    kind: SessionKind,
    words: Vec<VocabularyWord>,
    questions: Vec<QuizQuestion>,
    answers: HashMap<WordId, String>,
    state: SessionState,
}

impl QuizSession {
    pub fn new(selection: QuizSelection<'_>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: selection.kind,
            words: selection.words.into_iter().cloned().collect(),
            questions: Vec::new(),
            answers: HashMap::new(),
            state: SessionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_review(&self) -> bool {
        self.kind == SessionKind::Review
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Shuffles the words and builds the questions.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        vocabulary: &[VocabularyWord],
        language: &str,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        if self.state != SessionState::Idle {
            return Err(QuizError::AlreadyStarted);
        }

        self.words.shuffle(rng);
        self.questions = generate_questions(&self.words, vocabulary, language, rng);
        self.state = SessionState::InProgress;
        tracing::debug!(
            session = %self.id,
            kind = ?self.kind,
            questions = self.questions.len(),
            "quiz started"
        );
        Ok(())
    }

    /// First question without an answer yet.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.state != SessionState::InProgress {
            return None;
        }
        self.questions.iter().find(|q| !self.answers.contains_key(&q.word_id))
    }

    /// Records the single allowed answer for `word_id`.
    pub fn answer(&mut self, word_id: WordId, answer: &str) -> Result<AnswerFeedback, QuizError> {
        if self.state != SessionState::InProgress {
            return Err(QuizError::NotInProgress);
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.word_id == word_id)
            .ok_or(QuizError::NotInQuiz(word_id))?;
        if self.answers.contains_key(&word_id) {
            return Err(QuizError::AlreadyAnswered(word_id));
        }

        let correct = question.is_correct(answer);
        let correct_answer = question.correct_answer.clone();
        self.answers.insert(word_id, answer.to_string());

        if self.answers.len() == self.questions.len() {
            self.state = SessionState::Finished;
            tracing::debug!(session = %self.id, "quiz finished");
        }

        Ok(AnswerFeedback { correct, correct_answer, finished: self.state == SessionState::Finished })
    }

    /// Correct and incorrect word ids, once every question is answered.
    pub fn results(&self) -> Option<QuizResults> {
        if self.state != SessionState::Finished {
            return None;
        }

        let mut results = QuizResults::default();
        for question in &self.questions {
            let answered_correctly =
                self.answers.get(&question.word_id).is_some_and(|a| question.is_correct(a));
            if answered_correctly {
                results.correct.push(question.word_id);
            } else {
                results.incorrect.push(question.word_id);
            }
        }
        Some(results)
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        if self.state != SessionState::Finished {
            return None;
        }

        let mistakes: Vec<Mistake> = self
            .questions
            .iter()
            .filter_map(|question| {
                let given = self.answers.get(&question.word_id)?;
                (!question.is_correct(given)).then(|| Mistake {
                    word_id: question.word_id,
                    prompt: question.prompt.clone(),
                    given_answer: given.clone(),
                    correct_answer: question.correct_answer.clone(),
                })
            })
            .collect();

        let total = self.questions.len();
        let score = total - mistakes.len();
        let percentage = if total > 0 { score as f32 / total as f32 * 100.0 } else { 0.0 };
        Some(QuizSummary { score, total, percentage, mistakes })
    }
}
