use std::fmt::Write as _;

use quiz_core::model::{MetricKey, MetricRow};

/// Multi-line block for one source's metrics.
pub fn metric_row(row: &MetricRow) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n# {}", row.source);
    let _ = writeln!(out, "  Correct: {}", row.correct);
    let _ = writeln!(out, "  Incorrect: {}", row.incorrect);
    let _ = writeln!(out, "  Total attempts: {}", row.total);
    let _ = writeln!(out, "  Accuracy: {:.1}%", row.accuracy);
    let _ = write!(out, "  Average reveals (when correct): {:.2}", row.avg_display);
    out
}

/// Numbered metric menu, one entry per line.
pub fn metric_menu() -> String {
    MetricKey::ALL
        .iter()
        .zip(1..)
        .map(|(key, n)| format!("{n}. {}", key.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
