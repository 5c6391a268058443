use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerMatch, SourceId};

/// Points for a correct guess after the first reveal.
pub const BASE_POINTS: u32 = 10;
/// Points lost for each reveal beyond the first.
pub const POINTS_PER_EXTRA_REVEAL: u32 = 3;

/// Score for a correct round given how many spans were revealed.
///
/// Answering before any reveal counts as one reveal, so a round never scores
/// more than [`BASE_POINTS`].
///
/// ```
/// # use quiz_core::model::round_score;
/// assert_eq!(round_score(1), 10);
/// assert_eq!(round_score(3), 4);
/// assert_eq!(round_score(5), 0);
/// ```
#[must_use]
pub fn round_score(reveals: u32) -> u32 {
    let extra = reveals.max(1) - 1;
    BASE_POINTS.saturating_sub(POINTS_PER_EXTRA_REVEAL.saturating_mul(extra))
}

/// Scored result of one finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub source: SourceId,
    pub verdict: AnswerMatch,
    pub display_count: u32,
    pub score: u32,
}

impl RoundResult {
    #[must_use]
    pub fn new(source: SourceId, verdict: AnswerMatch, display_count: u32) -> Self {
        let score = if verdict.is_success() {
            round_score(display_count)
        } else {
            0
        };
        Self {
            source,
            verdict,
            display_count,
            score,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.verdict.is_success()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Aggregate result of one quiz session, written to the summary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    rounds_planned: u32,
    correct: u32,
    incorrect: u32,
    total_score: u32,
    display_counts: Vec<u32>,
}

impl SessionSummary {
    /// Build a summary from the rounds played in a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_rounds(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        rounds_planned: u32,
        rounds: &[RoundResult],
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut total_score = 0_u32;
        let mut display_counts = Vec::new();
        for round in rounds {
            if round.succeeded() {
                correct = correct.saturating_add(1);
                display_counts.push(round.display_count);
            } else {
                incorrect = incorrect.saturating_add(1);
            }
            total_score = total_score.saturating_add(round.score);
        }

        Ok(Self {
            started_at,
            completed_at,
            rounds_planned,
            correct,
            incorrect,
            total_score,
            display_counts,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Best possible score for the planned number of rounds.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        BASE_POINTS.saturating_mul(self.rounds_planned)
    }

    #[must_use]
    pub fn display_counts(&self) -> &[u32] {
        &self.display_counts
    }

    /// Mean reveals over correct rounds; 0 when nothing was answered correctly.
    #[must_use]
    pub fn avg_display(&self) -> f64 {
        if self.display_counts.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.display_counts.iter().map(|&c| f64::from(c)).sum();
        sum / self.display_counts.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn result(name: &str, verdict: AnswerMatch, shown: u32) -> RoundResult {
        RoundResult::new(SourceId::new(name).unwrap(), verdict, shown)
    }

    #[test]
    fn score_drops_per_reveal_and_floors_at_zero() {
        assert_eq!(round_score(0), 10);
        assert_eq!(round_score(1), 10);
        assert_eq!(round_score(2), 7);
        assert_eq!(round_score(3), 4);
        assert_eq!(round_score(4), 1);
        assert_eq!(round_score(5), 0);
        assert_eq!(round_score(u32::MAX), 0);
    }

    #[test]
    fn wrong_rounds_score_nothing() {
        assert_eq!(result("a", AnswerMatch::Wrong, 1).score, 0);
        assert_eq!(result("a", AnswerMatch::Fuzzy, 2).score, 7);
    }

    #[test]
    fn summary_tallies_rounds() {
        let now = fixed_now();
        let rounds = vec![
            result("a", AnswerMatch::Exact, 1),
            result("b", AnswerMatch::Wrong, 3),
            result("c", AnswerMatch::Fuzzy, 2),
        ];

        let summary = SessionSummary::from_rounds(now, now, 10, &rounds).unwrap();

        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.attempts(), 3);
        assert_eq!(summary.total_score(), 17);
        assert_eq!(summary.max_score(), 100);
        assert_eq!(summary.display_counts(), &[1, 2]);
        assert!((summary.avg_display() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_rejects_reversed_time_range() {
        let now = fixed_now();
        let err = SessionSummary::from_rounds(now, now - chrono::Duration::seconds(1), 10, &[])
            .unwrap_err();
        assert_eq!(err, SessionSummaryError::InvalidTimeRange);
    }
}
