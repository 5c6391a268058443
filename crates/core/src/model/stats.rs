use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use thiserror::Error;

use crate::model::SourceId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceStatError {
    #[error("correct count ({correct}) does not match display counts ({display_counts})")]
    CountMismatch { correct: u32, display_counts: usize },
}

/// Cumulative results for one source across all sessions.
///
/// Invariant: `correct == display_counts.len()`. Every correct round records
/// how many spans were revealed before the guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStat {
    correct: u32,
    incorrect: u32,
    display_counts: Vec<u32>,
}

impl SourceStat {
    /// Rehydrate a stat from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SourceStatError::CountMismatch` if `correct` and the number of
    /// display counts disagree.
    pub fn from_persisted(
        correct: u32,
        incorrect: u32,
        display_counts: Vec<u32>,
    ) -> Result<Self, SourceStatError> {
        if usize::try_from(correct).ok() != Some(display_counts.len()) {
            return Err(SourceStatError::CountMismatch {
                correct,
                display_counts: display_counts.len(),
            });
        }
        Ok(Self {
            correct,
            incorrect,
            display_counts,
        })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn display_counts(&self) -> &[u32] {
        &self.display_counts
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Build a stat from persisted fields, forcing the invariant instead of
    /// rejecting the record. `correct` wins: surplus display counts are
    /// dropped and missing ones are filled with `0`.
    #[must_use]
    pub fn repaired(correct: u32, incorrect: u32, mut display_counts: Vec<u32>) -> Self {
        let wanted = usize::try_from(correct).unwrap_or(usize::MAX);
        display_counts.resize(wanted, 0);
        Self {
            correct,
            incorrect,
            display_counts,
        }
    }

    /// Fold `other` into this stat.
    pub fn merge(&mut self, other: SourceStat) {
        self.correct = self.correct.saturating_add(other.correct);
        self.incorrect = self.incorrect.saturating_add(other.incorrect);
        self.display_counts.extend(other.display_counts);
        let wanted = usize::try_from(self.correct).unwrap_or(usize::MAX);
        self.display_counts.truncate(wanted);
    }

    /// Record the outcome of one round.
    pub fn record(&mut self, succeeded: bool, display_count: u32) {
        if succeeded {
            self.correct = self.correct.saturating_add(1);
            self.display_counts.push(display_count);
        } else {
            self.incorrect = self.incorrect.saturating_add(1);
        }
    }
}

/// All per-source stats, loaded and saved as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsStore {
    entries: BTreeMap<SourceId, SourceStat>,
}

impl StatsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, source: &SourceId) -> Option<&SourceStat> {
        self.entries.get(source)
    }

    /// Insert or replace the stat for `source`.
    pub fn insert(&mut self, source: SourceId, stat: SourceStat) {
        self.entries.insert(source, stat);
    }

    /// Insert `stat`, merging it into any existing entry for `source`.
    ///
    /// Returns `true` if an entry was already present.
    pub fn merge(&mut self, source: SourceId, stat: SourceStat) -> bool {
        match self.entries.entry(source) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().merge(stat);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(stat);
                false
            }
        }
    }

    /// Record one round for `source`, creating a zeroed entry if needed.
    pub fn record(&mut self, source: &SourceId, succeeded: bool, display_count: u32) {
        self.entries
            .entry(source.clone())
            .or_default()
            .record(succeeded, display_count);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &SourceStat)> {
        self.entries.iter()
    }
}

impl FromIterator<(SourceId, SourceStat)> for StatsStore {
    fn from_iter<I: IntoIterator<Item = (SourceId, SourceStat)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> SourceId {
        SourceId::new(raw).unwrap()
    }

    #[test]
    fn record_creates_and_updates_entries() {
        let mut store = StatsStore::new();
        store.record(&id("song1"), true, 2);
        store.record(&id("song1"), false, 3);
        store.record(&id("song2"), false, 1);

        let song1 = store.get(&id("song1")).unwrap();
        assert_eq!(song1.correct(), 1);
        assert_eq!(song1.incorrect(), 1);
        assert_eq!(song1.display_counts(), &[2]);

        let song2 = store.get(&id("song2")).unwrap();
        assert_eq!(song2.correct(), 0);
        assert_eq!(song2.incorrect(), 1);
        assert!(song2.display_counts().is_empty());
    }

    #[test]
    fn correct_always_matches_display_counts() {
        let mut store = StatsStore::new();
        let outcomes = [
            ("a", true, 1),
            ("b", false, 3),
            ("a", true, 3),
            ("c", true, 2),
            ("a", false, 2),
            ("b", true, 1),
        ];
        for (source, ok, shown) in outcomes {
            store.record(&id(source), ok, shown);
            for (_, stat) in store.iter() {
                assert_eq!(stat.correct() as usize, stat.display_counts().len());
            }
        }
    }

    #[test]
    fn persisted_mismatch_is_rejected() {
        let err = SourceStat::from_persisted(2, 0, vec![1]).unwrap_err();
        assert_eq!(
            err,
            SourceStatError::CountMismatch {
                correct: 2,
                display_counts: 1
            }
        );
        assert!(SourceStat::from_persisted(1, 4, vec![3]).is_ok());
    }

    #[test]
    fn repair_keeps_correct_and_fixes_counts() {
        let short = SourceStat::repaired(3, 1, vec![2]);
        assert_eq!(short.display_counts(), &[2, 0, 0]);
        assert_eq!(short.incorrect(), 1);

        let long = SourceStat::repaired(1, 0, vec![4, 5, 6]);
        assert_eq!(long.display_counts(), &[4]);
    }

    #[test]
    fn merging_sums_counts_and_keeps_invariant() {
        let mut store = StatsStore::new();
        assert!(!store.merge(id("Lemon"), SourceStat::from_persisted(1, 2, vec![3]).unwrap()));
        assert!(store.merge(id("Lemon"), SourceStat::from_persisted(2, 0, vec![1, 2]).unwrap()));

        let lemon = store.get(&id("Lemon")).unwrap();
        assert_eq!(lemon.correct(), 3);
        assert_eq!(lemon.incorrect(), 2);
        assert_eq!(lemon.display_counts(), &[3, 1, 2]);
    }
}
