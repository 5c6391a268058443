use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// What to do when a picked source cannot be read mid-session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingCorpusPolicy {
    /// Stop the whole session; stats and summary are still saved.
    #[default]
    EndSession,
    /// Report the failure and move on to the next round.
    SkipRound,
}

impl FromStr for MissingCorpusPolicy {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "end" | "end-session" => Ok(Self::EndSession),
            "skip" | "skip-round" => Ok(Self::SkipRound),
            _ => Err(InputError::InvalidInput {
                field: "missing corpus policy",
                raw: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for MissingCorpusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndSession => f.write_str("end-session"),
            Self::SkipRound => f.write_str("skip-round"),
        }
    }
}

/// Knobs for one quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub rounds: u32,
    pub max_reveals: u32,
    pub missing_corpus: MissingCorpusPolicy,
}

impl QuizConfig {
    fn default_rounds() -> u32 {
        10
    }

    fn default_max_reveals() -> u32 {
        3
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_max_reveals(mut self, max_reveals: u32) -> Self {
        self.max_reveals = max_reveals;
        self
    }

    #[must_use]
    pub fn with_missing_corpus(mut self, policy: MissingCorpusPolicy) -> Self {
        self.missing_corpus = policy;
        self
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            rounds: Self::default_rounds(),
            max_reveals: Self::default_max_reveals(),
            missing_corpus: MissingCorpusPolicy::default(),
        }
    }
}
