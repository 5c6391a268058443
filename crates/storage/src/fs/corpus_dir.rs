use std::path::{Path, PathBuf};

use quiz_core::model::SourceId;

use super::io_err;
use crate::repository::{CorpusRepository, StorageError};

/// Only files with this extension are offered as quiz sources.
pub const CORPUS_EXTENSION: &str = "txt";

/// Quiz sources read from `*.txt` files in a single directory.
#[derive(Debug, Clone)]
pub struct CorpusDirRepository {
    dir: PathBuf,
}

impl CorpusDirRepository {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `source`.
    ///
    /// Usually `<dir>/<source>.txt`. File names with surrounding whitespace
    /// list under the trimmed id, so those are found by scanning the directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no listed file maps to `source`.
    pub fn source_path(&self, source: &SourceId) -> Result<PathBuf, StorageError> {
        let direct = self.dir.join(format!("{}.{CORPUS_EXTENSION}", source.as_str()));
        if direct.is_file() {
            return Ok(direct);
        }
        self.source_files()?
            .into_iter()
            .find_map(|(id, path)| (id == *source).then_some(path))
            .ok_or_else(|| StorageError::NotFound(direct.display().to_string()))
    }

    // Every `.txt` file in the directory with the id it lists under.
    fn source_files(&self) -> Result<Vec<(SourceId, PathBuf)>, StorageError> {
        let mut files = Vec::new();
        for path in self.regular_files()? {
            if !has_corpus_extension(&path) {
                continue;
            }
            match SourceId::from_path(&path) {
                Ok(source) => files.push((source, path)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping source with unusable name");
                }
            }
        }
        Ok(files)
    }

    fn regular_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| io_err(&self.dir, &e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_err(&self.dir, &e))?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn has_corpus_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == CORPUS_EXTENSION)
}

impl CorpusRepository for CorpusDirRepository {
    fn list_sources(&self) -> Result<Vec<SourceId>, StorageError> {
        let mut sources: Vec<SourceId> =
            self.source_files()?.into_iter().map(|(id, _)| id).collect();
        sources.sort();
        sources.dedup();
        Ok(sources)
    }

    fn read_source(&self, source: &SourceId) -> Result<String, StorageError> {
        let path = self.source_path(source)?;
        std::fs::read_to_string(&path).map_err(|e| io_err(&path, &e))
    }

    fn list_files(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .regular_files()?
            .iter()
            .filter_map(|path| path.file_name()?.to_str().map(str::to_owned))
            .collect())
    }

    fn read_file(&self, name: &str) -> Result<String, StorageError> {
        // Only bare names inside the directory; no path components.
        if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
            return Err(StorageError::NotFound(name.to_owned()));
        }
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| io_err(&path, &e))
    }
}
