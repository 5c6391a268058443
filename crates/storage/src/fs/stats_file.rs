use std::path::{Path, PathBuf};

use quiz_core::model::StatsStore;

use super::mapping::{StatsDocument, document_to_store, store_to_document};
use super::{io_err, write_whole};
use crate::repository::{StatsRepository, StorageError};

/// Stats store persisted as one pretty-printed JSON object.
///
/// The file is read once and rewritten whole on save. There is no locking, so
/// two processes sharing a file will overwrite each other (last writer wins).
#[derive(Debug, Clone)]
pub struct JsonStatsRepository {
    path: PathBuf,
}

impl JsonStatsRepository {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsRepository for JsonStatsRepository {
    fn load_stats(&self) -> Result<StatsStore, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "stats file missing; starting empty");
                return Ok(StatsStore::new());
            }
            Err(err) => return Err(io_err(&self.path, &err)),
        };

        let doc: StatsDocument = serde_json::from_str(&text)
            .map_err(|e| StorageError::Decode(format!("{}: {e}", self.path.display())))?;
        let store = document_to_store(doc);
        tracing::debug!(path = %self.path.display(), sources = store.len(), "stats loaded");
        Ok(store)
    }

    fn save_stats(&self, store: &StatsStore) -> Result<(), StorageError> {
        let doc = store_to_document(store);
        let mut text = serde_json::to_string_pretty(&doc)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        text.push('\n');
        write_whole(&self.path, &text)?;
        tracing::debug!(path = %self.path.display(), sources = store.len(), "stats saved");
        Ok(())
    }
}
