#![forbid(unsafe_code)]

pub mod fs;
pub mod repository;

pub use repository::{
    CorpusRepository, InMemoryRepository, SessionSummaryRepository, StatsRepository, Storage,
    StorageError,
};
