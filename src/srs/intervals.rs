use serde::{
    Deserialize,
    Serialize,
};

use crate::core::VocabError;

pub const DEFAULT_INTERVALS_DAYS: [u32; 5] = [1, 3, 7, 14, 30];

/// Review gaps in days, indexed by srs level. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalTable(Vec<u32>);

impl IntervalTable {
    pub fn new(days: Vec<u32>) -> Result<Self, VocabError> {
        if days.is_empty() {
            return Err(VocabError::EmptyIntervalTable);
        }
        Ok(Self(days))
    }

    /// Highest reachable level.
    pub fn ceiling(&self) -> u32 {
        (self.0.len() - 1) as u32
    }

    pub fn next_level(&self, current: u32) -> u32 {
        current.saturating_add(1).min(self.ceiling())
    }

    pub fn days_for(&self, level: u32) -> u32 {
        let index = (level as usize).min(self.0.len() - 1);
        self.0[index]
    }

    pub fn is_monotonic(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self(DEFAULT_INTERVALS_DAYS.to_vec())
    }
}

impl TryFrom<Vec<u32>> for IntervalTable {
    type Error = VocabError;

    fn try_from(days: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<IntervalTable> for Vec<u32> {
    fn from(table: IntervalTable) -> Self {
        table.0
    }
}
