use std::sync::Arc;

use quiz_core::model::{MetricRow, SourceId, StatsStore, compute_metrics};
use storage::repository::StatsRepository;

use crate::error::StatsError;

/// Loads, updates and saves the cumulative stats store.
#[derive(Clone)]
pub struct StatsService {
    stats: Arc<dyn StatsRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    /// Load the store, surfacing decode problems to the caller.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::StoreDecode` for malformed data, or
    /// `StatsError::Storage` if the store cannot be read.
    pub fn load(&self) -> Result<StatsStore, StatsError> {
        Ok(self.stats.load_stats()?)
    }

    /// Load the store, falling back to an empty one if the persisted document
    /// is not valid JSON. A missing store already loads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the store exists but cannot be read.
    pub fn load_or_empty(&self) -> Result<StatsStore, StatsError> {
        match self.load() {
            Err(StatsError::StoreDecode(reason)) => {
                tracing::warn!(%reason, "stats store unreadable; starting from empty");
                Ok(StatsStore::new())
            }
            other => other,
        }
    }

    /// Replace the persisted store.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the store cannot be written.
    pub fn save(&self, store: &StatsStore) -> Result<(), StatsError> {
        self.stats.save_stats(store)?;
        tracing::info!(sources = store.len(), "stats store saved");
        Ok(())
    }

    /// Record one round for `source` in `store`.
    pub fn record(store: &mut StatsStore, source: &SourceId, succeeded: bool, display_count: u32) {
        store.record(source, succeeded, display_count);
    }

    /// Derived metric rows for every source in the persisted store.
    ///
    /// # Errors
    ///
    /// See [`StatsService::load`].
    pub fn load_metrics(&self) -> Result<Vec<MetricRow>, StatsError> {
        Ok(compute_metrics(&self.load()?))
    }
}
