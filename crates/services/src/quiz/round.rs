use rand::Rng;
use std::fmt;

use quiz_core::model::{AnswerMatch, Corpus, RoundResult, SourceId, Span, classify};
use quiz_core::sampler::{Pick, next_span};

use crate::error::QuizError;

//
// ─── REVEALS ───────────────────────────────────────────────────────────────────
//

/// One revealed span, with the source name masked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// 1-based reveal number within the round.
    pub number: u32,
    pub span: Span,
    pub masked: Vec<String>,
}

/// Why a round stopped offering new reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealHalt {
    /// The per-round reveal limit was reached.
    LimitReached,
    /// The drawn span length does not fit in the corpus.
    CorpusTooShort { needed: usize, available: usize },
    /// No non-overlapping span was found within the attempt bound.
    Exhausted,
}

impl fmt::Display for RevealHalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitReached => f.write_str("reveal limit reached"),
            Self::CorpusTooShort { needed, available } => write!(
                f,
                "not enough lines to reveal ({needed} needed, {available} available)"
            ),
            Self::Exhausted => f.write_str("no unrevealed lines could be found"),
        }
    }
}

/// Result of asking a round for its next reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    Revealed(Reveal),
    Halted(RevealHalt),
}

/// Original, unmasked text of one reveal, shown once the round is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub number: u32,
    pub span: Span,
    pub lines: Vec<String>,
}

/// Everything the console needs to report a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub result: RoundResult,
    pub transcript: Vec<TranscriptEntry>,
}

impl RoundOutcome {
    #[must_use]
    pub fn source(&self) -> &SourceId {
        &self.result.source
    }

    #[must_use]
    pub fn verdict(&self) -> AnswerMatch {
        self.result.verdict
    }
}

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// A single quiz round over one corpus.
///
/// Spans are revealed one at a time (user paced) until the limit is reached,
/// the sampler halts, or the player chooses to answer.
pub struct QuizRound {
    corpus: Corpus,
    max_reveals: u32,
    spans: Vec<Span>,
    halted: Option<RevealHalt>,
    outcome: Option<RoundOutcome>,
}

impl QuizRound {
    #[must_use]
    pub fn new(corpus: Corpus, max_reveals: u32) -> Self {
        Self {
            corpus,
            max_reveals,
            spans: Vec::new(),
            halted: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn source(&self) -> &SourceId {
        self.corpus.source()
    }

    /// Number of non-blank lines available to reveal from.
    #[must_use]
    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Spans revealed so far.
    #[must_use]
    pub fn reveals(&self) -> u32 {
        u32::try_from(self.spans.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn halted(&self) -> Option<RevealHalt> {
        self.halted
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.outcome.is_some()
    }

    /// True while another reveal may still be attempted.
    #[must_use]
    pub fn can_reveal(&self) -> bool {
        !self.is_answered() && self.halted.is_none() && self.reveals() < self.max_reveals
    }

    /// Reveal the next span.
    ///
    /// Once a halt is returned the round stays halted; later calls return the
    /// same halt without drawing again.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if the round was already answered.
    pub fn reveal_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RevealStep, QuizError> {
        if self.is_answered() {
            return Err(QuizError::Completed);
        }
        if let Some(halt) = self.halted {
            return Ok(RevealStep::Halted(halt));
        }
        if self.reveals() >= self.max_reveals {
            self.halted = Some(RevealHalt::LimitReached);
            return Ok(RevealStep::Halted(RevealHalt::LimitReached));
        }

        let halt = match next_span(rng, self.corpus.len(), &self.spans) {
            Pick::Span(span) => {
                self.spans.push(span);
                return Ok(RevealStep::Revealed(Reveal {
                    number: self.reveals(),
                    span,
                    masked: self.corpus.masked_lines(span),
                }));
            }
            Pick::CorpusTooShort { needed, available } => {
                RevealHalt::CorpusTooShort { needed, available }
            }
            Pick::Exhausted => RevealHalt::Exhausted,
        };
        self.halted = Some(halt);
        Ok(RevealStep::Halted(halt))
    }

    /// Unmasked text of every reveal, in reveal order.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.spans
            .iter()
            .zip(1_u32..)
            .map(|(span, number)| TranscriptEntry {
                number,
                span: *span,
                lines: self.corpus.lines(*span).to_vec(),
            })
            .collect()
    }

    /// Classify the player's guess and close the round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if the round was already answered.
    pub fn answer(&mut self, guess: &str) -> Result<&RoundOutcome, QuizError> {
        if self.is_answered() {
            return Err(QuizError::Completed);
        }

        let verdict = classify(guess.trim(), self.source().as_str());
        let result = RoundResult::new(self.source().clone(), verdict, self.reveals());
        let transcript = self.transcript();
        Ok(&*self.outcome.insert(RoundOutcome { result, transcript }))
    }
}

impl fmt::Debug for QuizRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRound")
            .field("source", self.corpus.source())
            .field("corpus_len", &self.corpus.len())
            .field("spans", &self.spans)
            .field("halted", &self.halted)
            .field("answered", &self.is_answered())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::MASK;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn corpus(name: &str, lines: usize) -> Corpus {
        let text: String = (1..=lines).map(|i| format!("{name} line {i}\n\n")).collect();
        Corpus::from_text(SourceId::new(name).unwrap(), &text)
    }

    #[test]
    fn reveals_until_limit() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut round = QuizRound::new(corpus("Lemon", 40), 3);

        for expected in 1..=3 {
            assert!(round.can_reveal());
            match round.reveal_next(&mut rng).unwrap() {
                RevealStep::Revealed(reveal) => {
                    assert_eq!(reveal.number, expected);
                    assert_eq!(reveal.masked.len(), reveal.span.len());
                    for line in &reveal.masked {
                        assert!(line.starts_with(MASK), "{line}");
                    }
                }
                RevealStep::Halted(halt) => panic!("unexpected halt {halt:?}"),
            }
        }

        assert!(!round.can_reveal());
        assert_eq!(
            round.reveal_next(&mut rng).unwrap(),
            RevealStep::Halted(RevealHalt::LimitReached)
        );
        assert_eq!(round.reveals(), 3);
    }

    #[test]
    fn empty_corpus_halts_without_revealing() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut round = QuizRound::new(corpus("Empty", 0), 3);

        let step = round.reveal_next(&mut rng).unwrap();
        assert!(matches!(
            step,
            RevealStep::Halted(RevealHalt::CorpusTooShort { available: 0, .. })
        ));
        assert!(!round.can_reveal());
        assert_eq!(round.reveals(), 0);
    }

    #[test]
    fn answering_scores_by_reveals() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut round = QuizRound::new(corpus("Pretender", 30), 3);
        round.reveal_next(&mut rng).unwrap();
        round.reveal_next(&mut rng).unwrap();

        let outcome = round.answer("  pretender ").unwrap().clone();
        assert_eq!(outcome.verdict(), AnswerMatch::Exact);
        assert_eq!(outcome.result.display_count, 2);
        assert_eq!(outcome.result.score, 7);
        assert_eq!(outcome.transcript.len(), 2);
        assert!(outcome.transcript[0].lines[0].starts_with("Pretender line"));

        assert!(matches!(round.answer("again"), Err(QuizError::Completed)));
        assert!(matches!(round.reveal_next(&mut rng), Err(QuizError::Completed)));
    }

    #[test]
    fn immediate_answer_counts_as_first_reveal() {
        let mut round = QuizRound::new(corpus("Lemon", 5), 3);
        let outcome = round.answer("LEMON!").unwrap();
        assert_eq!(outcome.verdict(), AnswerMatch::Fuzzy);
        assert_eq!(outcome.result.display_count, 0);
        assert_eq!(outcome.result.score, 10);
        assert!(outcome.transcript.is_empty());
    }

    #[test]
    fn wrong_answer_scores_zero() {
        let mut round = QuizRound::new(corpus("Lemon", 5), 3);
        let outcome = round.answer("Orange").unwrap();
        assert_eq!(outcome.verdict(), AnswerMatch::Wrong);
        assert_eq!(outcome.result.score, 0);
        assert!(!outcome.result.succeeded());
    }
}
