mod console;
mod round;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use console::{QuizConsole, RevealChoice};
pub use round::{QuizRound, Reveal, RevealHalt, RevealStep, RoundOutcome, TranscriptEntry};
pub use workflow::{EndReason, QuizLoopService, SessionReport};
