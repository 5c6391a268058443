use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{SourceId, SourceStat, StatsStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MetricKeyError {
    #[error("unknown metric: {0}")]
    Unknown(String),
}

/// Fields a metric row can be sorted or filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKey {
    Correct,
    Incorrect,
    Total,
    Accuracy,
    AvgDisplay,
}

impl MetricKey {
    /// Menu order used by the interactive prompts (`1` = `Correct`).
    pub const ALL: [MetricKey; 5] = [
        MetricKey::Correct,
        MetricKey::Incorrect,
        MetricKey::Total,
        MetricKey::Accuracy,
        MetricKey::AvgDisplay,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Total => "total",
            Self::Accuracy => "accuracy",
            Self::AvgDisplay => "avg_display",
        }
    }

    /// Human-readable label for menus and tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "Correct answers",
            Self::Incorrect => "Incorrect answers",
            Self::Total => "Total attempts",
            Self::Accuracy => "Accuracy (%)",
            Self::AvgDisplay => "Average reveals (when correct)",
        }
    }

    /// Look up a key by its 1-based menu number.
    #[must_use]
    pub fn from_menu_choice(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }
}

impl FromStr for MetricKey {
    type Err = MetricKeyError;

    /// Accepts the field name (`avg_display`) or the menu number (`5`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(choice) = trimmed.parse::<usize>() {
            return Self::from_menu_choice(choice)
                .ok_or_else(|| MetricKeyError::Unknown(trimmed.to_owned()));
        }
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MetricKeyError::Unknown(trimmed.to_owned()))
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived view over one source's raw counts. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub source: SourceId,
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub accuracy: f64,
    pub avg_display: f64,
}

impl MetricRow {
    #[must_use]
    pub fn from_stat(source: SourceId, stat: &SourceStat) -> Self {
        let total = stat.total();
        let accuracy = if total > 0 {
            f64::from(stat.correct()) / f64::from(total) * 100.0
        } else {
            0.0
        };
        let counts = stat.display_counts();
        let avg_display = if counts.is_empty() {
            0.0
        } else {
            let sum: f64 = counts.iter().map(|&c| f64::from(c)).sum();
            sum / counts.len() as f64
        };

        Self {
            source,
            correct: stat.correct(),
            incorrect: stat.incorrect(),
            total,
            accuracy,
            avg_display,
        }
    }

    /// Value of `key` for this row, widened to `f64` for comparison.
    #[must_use]
    pub fn value(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Correct => f64::from(self.correct),
            MetricKey::Incorrect => f64::from(self.incorrect),
            MetricKey::Total => f64::from(self.total),
            MetricKey::Accuracy => self.accuracy,
            MetricKey::AvgDisplay => self.avg_display,
        }
    }
}

/// One row per source, in store iteration order.
#[must_use]
pub fn compute_metrics(store: &StatsStore) -> Vec<MetricRow> {
    store
        .iter()
        .map(|(source, stat)| MetricRow::from_stat(source.clone(), stat))
        .collect()
}
