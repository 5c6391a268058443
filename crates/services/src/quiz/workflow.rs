use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Arc;

use quiz_core::model::{RoundResult, SessionSummary, StatsStore};
use storage::repository::{CorpusRepository, SessionSummaryRepository, Storage};

use super::console::{QuizConsole, RevealChoice};
use super::round::{QuizRound, RevealStep, RoundOutcome};
use crate::Clock;
use crate::config::{MissingCorpusPolicy, QuizConfig};
use crate::error::QuizError;
use crate::stats::StatsService;

/// Why a session finished before playing every planned round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    NoSources,
    SourceUnavailable,
}

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub summary: SessionSummary,
    pub rounds: Vec<RoundResult>,
    /// Round numbers skipped because their source could not be read.
    pub skipped_rounds: Vec<u32>,
    pub ended_early: Option<EndReason>,
}

/// Orchestrates a full quiz session: pick sources, play rounds, persist results.
///
/// The stats store is loaded once at the start and saved once at the end.
pub struct QuizLoopService {
    clock: Clock,
    config: QuizConfig,
    corpus: Arc<dyn CorpusRepository>,
    stats: StatsService,
    summaries: Arc<dyn SessionSummaryRepository>,
    rng: StdRng,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, config: QuizConfig, storage: &Storage) -> Self {
        Self {
            clock,
            config,
            corpus: Arc::clone(&storage.corpus),
            stats: StatsService::new(Arc::clone(&storage.stats)),
            summaries: Arc::clone(&storage.summaries),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source, e.g. with a seeded one for reproducible runs.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Play the whole session against `console`.
    ///
    /// Stats and the summary are written even when the session ends early.
    /// A console failure stops the session; what was played so far is still
    /// saved before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Console` if the console fails, `QuizError::Stats` if
    /// an existing stats store cannot be read, or storage/summary errors if
    /// results cannot be persisted.
    pub fn run<C: QuizConsole + ?Sized>(
        &mut self,
        console: &mut C,
    ) -> Result<SessionReport, QuizError> {
        let started_at = self.clock.now();
        let mut store = self.stats.load_or_empty()?;
        let mut results = Vec::new();
        let mut skipped_rounds = Vec::new();
        let mut ended_early = None;
        let mut fatal = None;

        tracing::info!(
            rounds = self.config.rounds,
            max_reveals = self.config.max_reveals,
            policy = %self.config.missing_corpus,
            "quiz session started"
        );

        for round_no in 1..=self.config.rounds {
            match self.play_round(round_no, console) {
                Ok(outcome) => {
                    let result = outcome.result;
                    StatsService::record(
                        &mut store,
                        &result.source,
                        result.succeeded(),
                        result.display_count,
                    );
                    tracing::info!(
                        round = round_no,
                        source = %result.source,
                        verdict = ?result.verdict,
                        reveals = result.display_count,
                        score = result.score,
                        "round finished"
                    );
                    results.push(result);
                }
                Err(err @ (QuizError::NoSources | QuizError::Sources(_))) => {
                    tracing::warn!(round = round_no, %err, "no playable sources; ending session");
                    if let Err(io) = console.round_failed(round_no, &err) {
                        fatal = Some(QuizError::Console(io));
                    }
                    ended_early = Some(EndReason::NoSources);
                    break;
                }
                Err(err) if err.is_per_round() => {
                    tracing::warn!(round = round_no, %err, "source unavailable");
                    if let Err(io) = console.round_failed(round_no, &err) {
                        fatal = Some(QuizError::Console(io));
                        break;
                    }
                    match self.config.missing_corpus {
                        MissingCorpusPolicy::EndSession => {
                            ended_early = Some(EndReason::SourceUnavailable);
                            break;
                        }
                        MissingCorpusPolicy::SkipRound => skipped_rounds.push(round_no),
                    }
                }
                Err(err) => {
                    fatal = Some(err);
                    break;
                }
            }
        }

        let summary = self.finish(started_at, &store, &results)?;
        if let Some(err) = fatal {
            return Err(err);
        }

        Ok(SessionReport {
            summary,
            rounds: results,
            skipped_rounds,
            ended_early,
        })
    }

    fn play_round<C: QuizConsole + ?Sized>(
        &mut self,
        round_no: u32,
        console: &mut C,
    ) -> Result<RoundOutcome, QuizError> {
        let sources = self.corpus.list_sources().map_err(QuizError::Sources)?;
        let source = sources
            .choose(&mut self.rng)
            .ok_or(QuizError::NoSources)?
            .clone();
        let corpus = self
            .corpus
            .load_corpus(&source)
            .map_err(|error| QuizError::CorpusRead {
                source_id: source.clone(),
                error,
            })?;

        let mut round = QuizRound::new(corpus, self.config.max_reveals);
        console.round_started(round_no, self.config.rounds, round.corpus_len())?;

        while round.can_reveal() {
            if console.choose(round.reveals() + 1)? == RevealChoice::AnswerNow {
                break;
            }
            match round.reveal_next(&mut self.rng)? {
                RevealStep::Revealed(reveal) => console.show_reveal(&reveal)?,
                RevealStep::Halted(halt) => {
                    tracing::debug!(round = round_no, %halt, "reveals halted");
                    console.reveal_halted(halt)?;
                }
            }
        }

        let guess = console.ask_answer()?;
        let outcome = round.answer(&guess)?.clone();
        console.show_outcome(&outcome)?;
        Ok(outcome)
    }

    fn finish(
        &self,
        started_at: chrono::DateTime<chrono::Utc>,
        store: &StatsStore,
        results: &[RoundResult],
    ) -> Result<SessionSummary, QuizError> {
        let completed_at = self.clock.now();
        let summary =
            SessionSummary::from_rounds(started_at, completed_at, self.config.rounds, results)?;
        self.stats.save(store)?;
        self.summaries.write_summary(&summary)?;
        tracing::info!(
            correct = summary.correct(),
            incorrect = summary.incorrect(),
            score = summary.total_score(),
            "quiz session finished"
        );
        Ok(summary)
    }
}
