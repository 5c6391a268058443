#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod quiz;
pub mod stats;

pub use quiz_core::Clock;

pub use config::{MissingCorpusPolicy, QuizConfig};
pub use error::{InputError, QuizError, StatsError};
pub use quiz::{QuizConsole, QuizLoopService, SessionReport};
pub use stats::StatsService;
