use std::io;

use super::round::{Reveal, RevealHalt, RoundOutcome};
use crate::error::QuizError;

/// Player's choice between reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealChoice {
    Reveal,
    AnswerNow,
}

/// Operator interface for a quiz session.
///
/// The session loop only suspends inside these calls. Implementations block
/// on the terminal; tests script them.
pub trait QuizConsole {
    /// A new round is starting over a corpus with `corpus_len` usable lines.
    fn round_started(&mut self, round: u32, rounds: u32, corpus_len: usize) -> io::Result<()>;

    /// Ask whether to reveal span number `next_reveal` or answer now.
    fn choose(&mut self, next_reveal: u32) -> io::Result<RevealChoice>;

    fn show_reveal(&mut self, reveal: &Reveal) -> io::Result<()>;

    /// The round cannot reveal further spans.
    fn reveal_halted(&mut self, halt: RevealHalt) -> io::Result<()>;

    /// Read the player's guess for the source name.
    fn ask_answer(&mut self) -> io::Result<String>;

    fn show_outcome(&mut self, outcome: &RoundOutcome) -> io::Result<()>;

    /// A round could not be played (unreadable source, no sources, ...).
    fn round_failed(&mut self, round: u32, error: &QuizError) -> io::Result<()>;
}
