use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use quiz_core::model::SessionSummary;

use super::write_whole;
use crate::repository::{SessionSummaryRepository, StorageError};

/// Plain-text rendering shared by the summary file and the console.
#[must_use]
pub fn render_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "=== Quiz session results ===");
    let _ = writeln!(
        out,
        "Completed at: {}",
        summary.completed_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Correct: {} / {}", summary.correct(), summary.attempts());
    let _ = writeln!(out, "Incorrect: {}", summary.incorrect());
    let _ = writeln!(
        out,
        "Total score: {} (max {})",
        summary.total_score(),
        summary.max_score()
    );
    let _ = writeln!(
        out,
        "Average reveals (when correct): {:.2}",
        summary.avg_display()
    );
    out
}

/// Writes the latest session summary to a text file, overwriting it each run.
#[derive(Debug, Clone)]
pub struct TextSummaryRepository {
    path: PathBuf,
}

impl TextSummaryRepository {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSummaryRepository for TextSummaryRepository {
    fn write_summary(&self, summary: &SessionSummary) -> Result<(), StorageError> {
        write_whole(&self.path, &render_summary(summary))?;
        tracing::debug!(path = %self.path.display(), "session summary written");
        Ok(())
    }
}
