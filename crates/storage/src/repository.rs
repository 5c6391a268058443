use quiz_core::model::{Corpus, SessionSummary, SourceId, StatsStore};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    /// Persisted data exists but cannot be decoded into domain types.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// An in-memory backend's lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

/// Whole-store persistence for per-source stats.
pub trait StatsRepository: Send + Sync {
    /// Load the full store. A store that was never saved loads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Decode` if persisted data is malformed, or other
    /// storage errors if it cannot be read.
    fn load_stats(&self) -> Result<StatsStore, StorageError>;

    /// Replace the persisted store with `store`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    fn save_stats(&self, store: &StatsStore) -> Result<(), StorageError>;
}

/// Read access to quiz sources.
pub trait CorpusRepository: Send + Sync {
    /// List every available source, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sources cannot be enumerated.
    fn list_sources(&self) -> Result<Vec<SourceId>, StorageError>;

    /// Raw text of a source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the source is gone, or `Io` if it
    /// cannot be read.
    fn read_source(&self, source: &SourceId) -> Result<String, StorageError>;

    /// Load a source as a line corpus (blank lines skipped).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CorpusRepository::read_source`].
    fn load_corpus(&self, source: &SourceId) -> Result<Corpus, StorageError> {
        let text = self.read_source(source)?;
        Ok(Corpus::from_text(source.clone(), &text))
    }

    /// Names of every file next to the sources, including ones that are not
    /// quiz sources. Defaults to `<source>.txt` for each source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing fails.
    fn list_files(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .list_sources()?
            .into_iter()
            .map(|source| format!("{source}.txt"))
            .collect())
    }

    /// Text of a file returned by [`CorpusRepository::list_files`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for names that are not known files.
    fn read_file(&self, name: &str) -> Result<String, StorageError> {
        let source = name
            .strip_suffix(".txt")
            .and_then(|stem| SourceId::new(stem).ok())
            .ok_or_else(|| StorageError::NotFound(name.to_owned()))?;
        self.read_source(&source)
    }
}

/// Output sink for the per-session summary.
pub trait SessionSummaryRepository: Send + Sync {
    /// Persist the summary, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be written.
    fn write_summary(&self, summary: &SessionSummary) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    stats: Arc<Mutex<StatsStore>>,
    sources: Arc<Mutex<BTreeMap<SourceId, String>>>,
    summaries: Arc<Mutex<Vec<SessionSummary>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a source with the given raw text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if the lock is poisoned.
    pub fn insert_source(&self, source: SourceId, text: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .sources
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard.insert(source, text.into());
        Ok(())
    }

    /// Remove a source, simulating a file deleted mid-session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if the lock is poisoned.
    pub fn remove_source(&self, source: &SourceId) -> Result<(), StorageError> {
        let mut guard = self
            .sources
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard.remove(source);
        Ok(())
    }

    /// Every summary written so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if the lock is poisoned.
    pub fn summaries(&self) -> Result<Vec<SessionSummary>, StorageError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl StatsRepository for InMemoryRepository {
    fn load_stats(&self) -> Result<StatsStore, StorageError> {
        let guard = self
            .stats
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_stats(&self, store: &StatsStore) -> Result<(), StorageError> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        *guard = store.clone();
        Ok(())
    }
}

impl CorpusRepository for InMemoryRepository {
    fn list_sources(&self) -> Result<Vec<SourceId>, StorageError> {
        let guard = self
            .sources
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.keys().cloned().collect())
    }

    fn read_source(&self, source: &SourceId) -> Result<String, StorageError> {
        let guard = self
            .sources
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard
            .get(source)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(source.to_string()))
    }
}

impl SessionSummaryRepository for InMemoryRepository {
    fn write_summary(&self, summary: &SessionSummary) -> Result<(), StorageError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard.push(summary.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stats: Arc<dyn StatsRepository>,
    pub corpus: Arc<dyn CorpusRepository>,
    pub summaries: Arc<dyn SessionSummaryRepository>,
}

impl Storage {
    /// Share one in-memory repository across all three roles.
    #[must_use]
    pub fn from_in_memory(repo: &InMemoryRepository) -> Self {
        let stats: Arc<dyn StatsRepository> = Arc::new(repo.clone());
        let corpus: Arc<dyn CorpusRepository> = Arc::new(repo.clone());
        let summaries: Arc<dyn SessionSummaryRepository> = Arc::new(repo.clone());
        Self {
            stats,
            corpus,
            summaries,
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
    fn round_trips_stats_store() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_stats().unwrap().is_empty());

        let mut store = StatsStore::new();
        store.record(&id("Lemon"), true, 2);
        repo.save_stats(&store).unwrap();

        let loaded = repo.load_stats().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn loads_corpus_without_blank_lines() {
        let repo = InMemoryRepository::new();
        repo.insert_source(id("Lemon"), "one\n\ntwo\n").unwrap();

        assert_eq!(repo.list_sources().unwrap(), vec![id("Lemon")]);
        let corpus = repo.load_corpus(&id("Lemon")).unwrap();
        assert_eq!(corpus.len(), 2);

        repo.remove_source(&id("Lemon")).unwrap();
        assert!(matches!(
            repo.load_corpus(&id("Lemon")),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let repo = InMemoryRepository::new();
        let sources = Arc::clone(&repo.sources);
        let _ = std::thread::spawn(move || {
            let _guard = sources.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(
            repo.insert_source(id("Lemon"), "x"),
            Err(StorageError::Poisoned(_))
        ));
        assert!(matches!(repo.list_sources(), Err(StorageError::Poisoned(_))));
    }

    #[test]
    fn storage_shares_one_backend() {
        let repo = InMemoryRepository::new();
        let storage = Storage::from_in_memory(&repo);
        repo.insert_source(id("a"), "x").unwrap();
        assert_eq!(storage.corpus.list_sources().unwrap().len(), 1);
    }
}
