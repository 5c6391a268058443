use quiz_core::model::{SourceId, SourceStat, StatsStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted shape of one source's stats.
///
/// Missing fields default to zero/empty so hand-edited files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SourceStatRecord {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    #[serde(default)]
    pub display_counts: Vec<u32>,
}

impl SourceStatRecord {
    pub(crate) fn from_stat(stat: &SourceStat) -> Self {
        Self {
            correct: stat.correct(),
            incorrect: stat.incorrect(),
            display_counts: stat.display_counts().to_vec(),
        }
    }

    /// Convert to a domain entry. A record whose `correct` disagrees with its
    /// display counts is repaired, not rejected.
    fn into_entry(self, key: &str) -> Result<(SourceId, SourceStat), quiz_core::Error> {
        let source = SourceId::new(key)?;
        let counts = self.display_counts.clone();
        let stat = SourceStat::from_persisted(self.correct, self.incorrect, counts)
            .unwrap_or_else(|err| {
                tracing::warn!(entry = %key, %err, "repairing stats entry");
                SourceStat::repaired(self.correct, self.incorrect, self.display_counts)
            });
        Ok((source, stat))
    }
}

/// Top-level JSON document: source name -> stats.
pub(crate) type StatsDocument = BTreeMap<String, SourceStatRecord>;

pub(crate) fn store_to_document(store: &StatsStore) -> StatsDocument {
    store
        .iter()
        .map(|(source, stat)| (source.to_string(), SourceStatRecord::from_stat(stat)))
        .collect()
}

/// Build a store from a parsed document.
///
/// Entries that cannot be keyed are skipped, and keys that trim to the same
/// source are merged; both cases are logged.
pub(crate) fn document_to_store(doc: StatsDocument) -> StatsStore {
    let mut store = StatsStore::new();
    for (key, record) in doc {
        match record.into_entry(&key) {
            Ok((source, stat)) => {
                if store.merge(source, stat) {
                    tracing::warn!(
                        entry = %key,
                        "stats entry merged with another key for the same source"
                    );
                }
            }
            Err(err) => tracing::warn!(entry = %key, %err, "skipping stats entry"),
        }
    }
    store
}
