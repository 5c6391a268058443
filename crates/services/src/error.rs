//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{SessionSummaryError, SourceId};
use storage::repository::StorageError;

/// Errors emitted by the quiz session loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz sources available")]
    NoSources,
    #[error("could not list quiz sources: {0}")]
    Sources(#[source] StorageError),
    #[error("could not read source {source_id}: {error}")]
    CorpusRead {
        source_id: SourceId,
        #[source]
        error: StorageError,
    },
    #[error("round already answered")]
    Completed,
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizError {
    /// Whether the error only affects the current round's source.
    #[must_use]
    pub fn is_per_round(&self) -> bool {
        matches!(self, Self::CorpusRead { .. })
    }
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error("stats store could not be decoded: {0}")]
    StoreDecode(String),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for StatsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Decode(msg) => Self::StoreDecode(msg),
            other => Self::Storage(other),
        }
    }
}

/// Invalid operator input for queries and prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("invalid {field}: {raw:?}")]
    InvalidInput { field: &'static str, raw: String },
}
