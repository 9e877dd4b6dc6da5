use std::collections::{
    btree_map,
    BTreeMap,
    BTreeSet,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::WordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsRecord {
    pub next_review_date: DateTime<Utc>, // only the calendar day matters
    pub srs_level: u32,
}

/// Scheduling records keyed by word id.
///
/// Having a record is what makes a word "learned": the learned set is
/// derived from the keys, so the two can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SrsStore {
    records: BTreeMap<WordId, SrsRecord>,
}

impl SrsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: WordId) -> Option<&SrsRecord> {
        self.records.get(&id)
    }

    pub fn is_learned(&self, id: WordId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn learned_ids(&self) -> BTreeSet<WordId> {
        self.records.keys().copied().collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, WordId, SrsRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of scheduled words per level.
    pub fn level_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.values() {
            *counts.entry(record.srs_level).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn insert(&mut self, id: WordId, record: SrsRecord) {
        self.records.insert(id, record);
    }

    pub(crate) fn remove(&mut self, id: WordId) -> Option<SrsRecord> {
        self.records.remove(&id)
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(WordId) -> bool) {
        self.records.retain(|id, _| keep(*id));
    }
}

impl FromIterator<(WordId, SrsRecord)> for SrsStore {
    fn from_iter<I: IntoIterator<Item = (WordId, SrsRecord)>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}
