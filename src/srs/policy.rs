use chrono::{
    DateTime,
    Utc,
};

use super::{
    IntervalTable,
    SrsRecord,
    SrsStore,
};
use crate::core::{
    DayBoundary,
    VocabularyWord,
    WordId,
};

/// Days between marking a word learned and its first review.
pub const FIRST_REVIEW_DELAY_DAYS: u32 = 1;

/// Scheduling rules. Stateless: every operation maps (store, event, now) to a new store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrsPolicy {
    intervals: IntervalTable,
    day_boundary: DayBoundary,
}

impl SrsPolicy {
    pub fn new(intervals: IntervalTable, day_boundary: DayBoundary) -> Self {
        Self { intervals, day_boundary }
    }

    pub fn intervals(&self) -> &IntervalTable {
        &self.intervals
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    /// Due once the review day has arrived, regardless of time of day.
    pub fn is_due(&self, record: &SrsRecord, now: DateTime<Utc>) -> bool {
        self.day_boundary.day_of(record.next_review_date) <= self.day_boundary.day_of(now)
    }

    /// Scheduled words whose review day has arrived, in vocabulary order.
    pub fn compute_due_items<'a>(
        &self,
        vocabulary: &'a [VocabularyWord],
        store: &SrsStore,
        now: DateTime<Utc>,
    ) -> Vec<&'a VocabularyWord> {
        vocabulary
            .iter()
            .filter(|word| store.get(word.id).is_some_and(|record| self.is_due(record, now)))
            .collect()
    }

    pub fn new_record(&self, now: DateTime<Utc>) -> SrsRecord {
        SrsRecord {
            next_review_date: self.day_boundary.add_days(now, FIRST_REVIEW_DELAY_DAYS),
            srs_level: 0,
        }
    }

    pub fn promote(&self, record: &SrsRecord, now: DateTime<Utc>) -> SrsRecord {
        let srs_level = self.intervals.next_level(record.srs_level);
        let interval_days = self.intervals.days_for(srs_level);
        SrsRecord { next_review_date: self.day_boundary.add_days(now, interval_days), srs_level }
    }

    /// Marks `id` learned (fresh level-0 record) or unlearned (record dropped).
    pub fn apply_learned_toggle(&self, id: WordId, store: &SrsStore, now: DateTime<Utc>) -> SrsStore {
        let mut next = store.clone();
        if next.remove(id).is_none() {
            next.insert(id, self.new_record(now));
        }
        next
    }

    /// Promotes correctly answered words and evicts incorrectly answered ones.
    ///
    /// Correct answers for words without a record are ignored. A word listed
    /// as both correct and incorrect ends up evicted.
    pub fn apply_quiz_results(
        &self,
        correct: &[WordId],
        incorrect: &[WordId],
        store: &SrsStore,
        now: DateTime<Utc>,
    ) -> SrsStore {
        let mut next = store.clone();

        for &id in correct {
            match next.get(id).copied() {
                Some(record) => next.insert(id, self.promote(&record, now)),
                None => tracing::debug!(word_id = id, "correct answer for unscheduled word ignored"),
            }
        }

        for &id in incorrect {
            next.remove(id);
        }

        next
    }
}
