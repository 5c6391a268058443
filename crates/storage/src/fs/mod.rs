//! File-backed adapters: JSON stats file, corpus directory and summary text file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::repository::{
    CorpusRepository, SessionSummaryRepository, StatsRepository, Storage, StorageError,
};

mod corpus_dir;
mod mapping;
mod stats_file;
mod summary_file;

pub use corpus_dir::{CORPUS_EXTENSION, CorpusDirRepository};
pub use stats_file::JsonStatsRepository;
pub use summary_file::{TextSummaryRepository, render_summary};

/// Locations used by the file-backed storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub corpus_dir: PathBuf,
    pub stats_file: PathBuf,
    pub summary_file: PathBuf,
}

impl Storage {
    /// Build a `Storage` backed by plain files.
    #[must_use]
    pub fn files(paths: &StoragePaths) -> Self {
        let stats: Arc<dyn StatsRepository> =
            Arc::new(JsonStatsRepository::new(&paths.stats_file));
        let corpus: Arc<dyn CorpusRepository> =
            Arc::new(CorpusDirRepository::new(&paths.corpus_dir));
        let summaries: Arc<dyn SessionSummaryRepository> =
            Arc::new(TextSummaryRepository::new(&paths.summary_file));
        Self {
            stats,
            corpus,
            summaries,
        }
    }
}

pub(crate) fn io_err(path: &Path, err: &std::io::Error) -> StorageError {
    if err.kind() == std::io::ErrorKind::NotFound {
        StorageError::NotFound(path.display().to_string())
    } else {
        StorageError::Io(format!("{}: {err}", path.display()))
    }
}

/// Write `contents` to `path`, replacing the file and creating parent directories.
pub(crate) fn write_whole(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, &e))?;
    }
    std::fs::write(path, contents).map_err(|e| io_err(path, &e))
}
