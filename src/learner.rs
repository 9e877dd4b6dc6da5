use std::collections::{
    BTreeMap,
    BTreeSet,
};

use chrono::{
    DateTime,
    Utc,
};
use rand::Rng;

use crate::{
    core::{
        VocabError,
        Vocabulary,
        VocabularyWord,
        WordId,
    },
    persistence::{
        load_json_or_default,
        save_json,
        KeyValueStore,
    },
    quiz::{
        select_quiz_candidates,
        QuizResults,
        QuizSession,
    },
    settings::Settings,
    srs::{
        SrsPolicy,
        SrsStore,
    },
};

pub const SRS_DATA_KEY: &str = "srsData";
pub const LEARNED_WORDS_KEY: &str = "learnedWords";
pub const BOOKMARKED_WORDS_KEY: &str = "bookmarkedWords";
pub const WORD_NOTES_KEY: &str = "wordNotes";
pub const LAST_VISITED_PAGE_KEY: &str = "lastVisitedPage";

/// Everything the app remembers about one learner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearnerProfile {
    srs: SrsStore,
    bookmarks: BTreeSet<WordId>,
    notes: BTreeMap<WordId, String>,
    last_visited_page: Option<u32>,
}

impl LearnerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S, policy: &SrsPolicy, now: DateTime<Utc>) -> Self {
        let srs: SrsStore = load_json_or_default(store, SRS_DATA_KEY);
        let learned: BTreeSet<WordId> = load_json_or_default(store, LEARNED_WORDS_KEY);

        let profile = Self {
            srs: reconcile(srs, &learned, policy, now),
            bookmarks: load_json_or_default(store, BOOKMARKED_WORDS_KEY),
            notes: load_json_or_default(store, WORD_NOTES_KEY),
            last_visited_page: load_json_or_default(store, LAST_VISITED_PAGE_KEY),
        };
        tracing::debug!(
            learned = profile.srs.len(),
            bookmarks = profile.bookmarks.len(),
            notes = profile.notes.len(),
            "learner profile loaded"
        );
        profile
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), VocabError> {
        save_json(store, SRS_DATA_KEY, &self.srs)?;
        save_json(store, LEARNED_WORDS_KEY, &self.srs.learned_ids())?;
        save_json(store, BOOKMARKED_WORDS_KEY, &self.bookmarks)?;
        save_json(store, WORD_NOTES_KEY, &self.notes)?;
        match self.last_visited_page {
            Some(page) => save_json(store, LAST_VISITED_PAGE_KEY, &page),
            None => store.remove(LAST_VISITED_PAGE_KEY),
        }
    }

    pub fn srs(&self) -> &SrsStore {
        &self.srs
    }

    pub fn is_learned(&self, id: WordId) -> bool {
        self.srs.is_learned(id)
    }

    pub fn learned_words(&self) -> BTreeSet<WordId> {
        self.srs.learned_ids()
    }

    /// Flips the learned flag and returns the new value.
    pub fn toggle_learned(&mut self, policy: &SrsPolicy, id: WordId, now: DateTime<Utc>) -> bool {
        self.srs = policy.apply_learned_toggle(id, &self.srs, now);
        let learned = self.srs.is_learned(id);
        tracing::info!(word_id = id, learned, "learned flag toggled");
        learned
    }

    /// Feeds a finished quiz back into the schedule.
    pub fn complete_quiz(&mut self, policy: &SrsPolicy, results: &QuizResults, now: DateTime<Utc>) {
        self.srs = policy.apply_quiz_results(&results.correct, &results.incorrect, &self.srs, now);
        tracing::info!(
            correct = results.correct.len(),
            incorrect = results.incorrect.len(),
            "quiz results applied"
        );
    }

    pub fn due_words<'a>(
        &self,
        policy: &SrsPolicy,
        vocabulary: &'a Vocabulary,
        now: DateTime<Utc>,
    ) -> Vec<&'a VocabularyWord> {
        policy.compute_due_items(vocabulary.words(), &self.srs, now)
    }

    pub fn learned_vocabulary<'a>(&self, vocabulary: &'a Vocabulary) -> Vec<&'a VocabularyWord> {
        vocabulary.words().iter().filter(|word| self.srs.is_learned(word.id)).collect()
    }

    /// Selects the words for the next quiz and starts the session.
    pub fn start_quiz<R: Rng + ?Sized>(
        &self,
        vocabulary: &Vocabulary,
        settings: &Settings,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<QuizSession, VocabError> {
        let policy = settings.policy();
        let due = self.due_words(&policy, vocabulary, now);
        let learned = self.learned_vocabulary(vocabulary);

        let selection = select_quiz_candidates(&due, &learned, &settings.selection_limits(), rng)?;
        let mut session = QuizSession::new(selection);
        session.start(vocabulary.words(), &settings.quiz_language, rng)?;
        Ok(session)
    }

    pub fn is_bookmarked(&self, id: WordId) -> bool {
        self.bookmarks.contains(&id)
    }

    pub fn bookmarks(&self) -> &BTreeSet<WordId> {
        &self.bookmarks
    }

    pub fn toggle_bookmark(&mut self, id: WordId) -> bool {
        if self.bookmarks.remove(&id) {
            false
        } else {
            self.bookmarks.insert(id);
            true
        }
    }

    pub fn note(&self, id: WordId) -> Option<&str> {
        self.notes.get(&id).map(String::as_str)
    }

    /// A blank note deletes the entry.
    pub fn update_note(&mut self, id: WordId, note: &str) {
        if note.trim().is_empty() {
            self.notes.remove(&id);
        } else {
            self.notes.insert(id, note.to_string());
        }
    }

    pub fn last_visited_page(&self) -> Option<u32> {
        self.last_visited_page
    }

    pub fn set_last_visited_page(&mut self, page: u32) {
        self.last_visited_page = Some(page);
    }

    /// Share of the corpus covered by learned words, as a percentage.
    pub fn learning_progress(&self, vocabulary: &Vocabulary, corpus_total_frequency: u64) -> f64 {
        if vocabulary.is_empty() || corpus_total_frequency == 0 {
            return 0.0;
        }
        let learned_frequency: u64 = vocabulary
            .words()
            .iter()
            .filter(|word| self.srs.is_learned(word.id))
            .map(|word| u64::from(word.frequency))
            .sum();
        (learned_frequency as f64 / corpus_total_frequency as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Brings a stored schedule back in line with the stored learned list.
fn reconcile(
    mut srs: SrsStore,
    learned: &BTreeSet<WordId>,
    policy: &SrsPolicy,
    now: DateTime<Utc>,
) -> SrsStore {
    let unlisted: Vec<WordId> = srs.iter().map(|(id, _)| *id).filter(|id| !learned.contains(id)).collect();
    if !unlisted.is_empty() {
        tracing::warn!(words = ?unlisted, "dropping schedules for words not marked learned");
        srs.retain(|id| learned.contains(&id));
    }

    for &id in learned {
        if !srs.is_learned(id) {
            tracing::warn!(word_id = id, "learned word had no schedule, scheduling for tomorrow");
            srs = policy.apply_learned_toggle(id, &srs, now);
        }
    }
    srs
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::{
        core::DayBoundary,
        persistence::MemoryStore,
        quiz::{
            QuizRefusal,
            SessionKind,
        },
        srs::{
            IntervalTable,
            SrsRecord,
        },
        test_fixtures::{
            at,
            word,
            words,
        },
    };

    fn policy() -> SrsPolicy {
        SrsPolicy::new(IntervalTable::default(), DayBoundary::Utc)
    }

    fn settings() -> Settings {
        Settings { day_boundary: DayBoundary::Utc, ..Settings::default() }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let policy = policy();
        let now = at(2024, 1, 1);
        let mut profile = LearnerProfile::new();
        profile.toggle_learned(&policy, 7, now);
        profile.toggle_learned(&policy, 9, now);
        profile.toggle_bookmark(3);
        profile.update_note(7, "rabb: Lord, sustainer");
        profile.set_last_visited_page(4);

        let mut store = MemoryStore::new();
        profile.save(&mut store).unwrap();
        let loaded = LearnerProfile::load(&store, &policy, at(2024, 3, 1));

        assert_eq!(loaded, profile);
        let learned: Vec<WordId> =
            serde_json::from_str(&store.load_raw(LEARNED_WORDS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(learned, vec![7, 9]);
    }

    #[test]
    fn test_load_reconciles_learned_list_with_schedule() {
        let mut store = MemoryStore::new();
        store.save_raw(LEARNED_WORDS_KEY, "[1, 2]").unwrap();
        store
            .save_raw(
                SRS_DATA_KEY,
                r#"{
                    "2": { "nextReviewDate": "2024-01-09T00:00:00.000Z", "srsLevel": 2 },
                    "5": { "nextReviewDate": "2024-01-03T00:00:00.000Z", "srsLevel": 1 }
                }"#,
            )
            .unwrap();

        let profile = LearnerProfile::load(&store, &policy(), at(2024, 1, 4));

        assert_eq!(profile.learned_words(), BTreeSet::from([1, 2]));
        assert_eq!(
            profile.srs().get(1),
            Some(&SrsRecord { next_review_date: at(2024, 1, 5), srs_level: 0 })
        );
        assert_eq!(profile.srs().get(2).unwrap().srs_level, 2);
        assert!(profile.srs().get(5).is_none());
    }

    #[test]
    fn test_empty_storage_gives_empty_profile() {
        let profile = LearnerProfile::load(&MemoryStore::new(), &policy(), at(2024, 1, 1));
        assert_eq!(profile, LearnerProfile::new());
        assert_eq!(profile.last_visited_page(), None);
    }

    #[test]
    fn test_notes_and_bookmarks() {
        let mut profile = LearnerProfile::new();

        assert!(profile.toggle_bookmark(4));
        assert!(profile.is_bookmarked(4));
        assert!(!profile.toggle_bookmark(4));
        assert!(profile.bookmarks().is_empty());

        profile.update_note(4, "appears in al-Fatiha");
        assert_eq!(profile.note(4), Some("appears in al-Fatiha"));
        profile.update_note(4, "   \n");
        assert_eq!(profile.note(4), None);
    }

    #[test]
    fn test_learning_progress_weighs_frequency() {
        let vocabulary = Vocabulary::new(vec![word(1, "Allah", 2699), word(2, "Lord", 975)]).unwrap();
        let policy = policy();
        let mut profile = LearnerProfile::new();
        assert_eq!(profile.learning_progress(&vocabulary, 77_430), 0.0);

        profile.toggle_learned(&policy, 2, at(2024, 1, 1));
        let progress = profile.learning_progress(&vocabulary, 77_430);
        assert!((progress - 975.0 / 774.30).abs() < 1e-9);

        profile.toggle_learned(&policy, 1, at(2024, 1, 1));
        assert_eq!(profile.learning_progress(&vocabulary, 1000), 100.0);
        assert_eq!(profile.learning_progress(&vocabulary, 0), 0.0);
    }

    #[test]
    fn test_review_quiz_promotes_and_evicts() {
        let vocabulary = Vocabulary::new(words(12)).unwrap();
        let settings = settings();
        let policy = settings.policy();
        let mut profile = LearnerProfile::new();
        for id in 1..=12 {
            profile.toggle_learned(&policy, id, at(2024, 1, 1));
        }
        // push most words out so only three are due on Jan 2
        let not_due: Vec<WordId> = (4..=12).collect();
        profile.complete_quiz(&policy, &QuizResults { correct: not_due, incorrect: vec![] }, at(2024, 1, 1));

        let now = at(2024, 1, 2);
        let mut rng = StdRng::seed_from_u64(17);
        let mut session = profile.start_quiz(&vocabulary, &settings, now, &mut rng).unwrap();
        assert_eq!(session.kind(), SessionKind::Review);
        let mut quizzed: Vec<WordId> = session.questions().iter().map(|q| q.word_id).collect();
        quizzed.sort();
        assert_eq!(quizzed, vec![1, 2, 3]);

        while let Some(question) = session.current_question().cloned() {
            let answer = if question.word_id == 2 {
                question.options.iter().find(|o| **o != question.correct_answer).unwrap().clone()
            } else {
                question.correct_answer.clone()
            };
            session.answer(question.word_id, &answer).unwrap();
        }
        profile.complete_quiz(&policy, &session.results().unwrap(), now);

        assert_eq!(profile.srs().get(1).unwrap().srs_level, 1);
        assert_eq!(profile.srs().get(1).unwrap().next_review_date, at(2024, 1, 5));
        assert!(!profile.is_learned(2));
        assert!(profile.srs().get(2).is_none());
        assert!(profile.due_words(&policy, &vocabulary, now).is_empty());
    }

    #[test]
    fn test_quiz_refused_without_enough_words() {
        let vocabulary = Vocabulary::new(words(5)).unwrap();
        let settings = settings();
        let mut profile = LearnerProfile::new();
        profile.toggle_learned(&settings.policy(), 1, at(2024, 1, 1));
        profile.toggle_learned(&settings.policy(), 2, at(2024, 1, 1));

        let result =
            profile.start_quiz(&vocabulary, &settings, at(2024, 1, 1), &mut StdRng::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(VocabError::Refused(QuizRefusal::NotEnoughWords { available: 2, required: 4 }))
        ));
    }
}
