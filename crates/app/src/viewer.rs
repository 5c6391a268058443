//! Interactive browser over the cumulative stats store.
//!
//! Two modes: a ranking (sort key, order, limit) and a search (name substring
//! plus any number of per-metric ranges).

use std::io::{self, BufRead, Write};

use quiz_core::model::{MetricKey, MetricRow};
use services::StatsError;
use services::stats::{
    FilterSet, RangeFilter, SortOrder, StatsService, filter_rows, limit_rows, parse_bound,
    sort_rows,
};

use crate::prompt::Prompter;
use crate::render;

/// Load the store and run one viewer pass.
///
/// A store that cannot be decoded is reported and treated as empty.
///
/// # Errors
///
/// Returns storage failures other than decoding, and console I/O errors.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    stats: &StatsService,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = match stats.load_metrics() {
        Ok(rows) => rows,
        Err(StatsError::StoreDecode(reason)) => {
            tracing::warn!(%reason, "stats store unreadable");
            prompter.say(format_args!("The stats file could not be read: {reason}"))?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if rows.is_empty() {
        prompter.say("No quiz statistics recorded yet.")?;
        return Ok(());
    }

    browse(prompter, rows)?;
    Ok(())
}

/// Mode menu followed by the chosen view.
pub fn browse<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    rows: Vec<MetricRow>,
) -> io::Result<()> {
    prompter.say("=== Quiz statistics ===")?;
    prompter.say("1. Ranking (sorted, optional limit)")?;
    prompter.say("2. Search (name and metric ranges)")?;

    match prompter.ask("Choose a mode (1 or 2): ")?.as_str() {
        "1" => {
            let (key, order, limit) = ask_ranking(prompter)?;
            let ranked = limit_rows(sort_rows(rows, key, order), limit);
            prompter.blank()?;
            prompter.say(format_args!("=== Ranking by {} ===", key.label()))?;
            print_rows(prompter, &ranked)
        }
        "2" => {
            let filters = ask_filters(prompter)?;
            let matched = filter_rows(rows, &filters);
            if matched.is_empty() {
                prompter.blank()?;
                return prompter.say("No matching data found.");
            }
            prompter.blank()?;
            prompter.say("=== Matching results ===")?;
            print_rows(prompter, &matched)
        }
        _ => prompter.say("Invalid choice. Exiting."),
    }
}

fn print_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    rows: &[MetricRow],
) -> io::Result<()> {
    for row in rows {
        prompter.say(render::metric_row(row))?;
    }
    Ok(())
}

fn ask_ranking<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<(MetricKey, SortOrder, Option<usize>)> {
    prompter.blank()?;
    prompter.say("Sort by:")?;
    prompter.say(render::metric_menu())?;
    let key = prompter
        .ask("Enter a number (1-5): ")?
        .parse::<usize>()
        .ok()
        .and_then(MetricKey::from_menu_choice)
        .unwrap_or(MetricKey::Accuracy);

    let order = if prompter.confirm("Ascending order? (y/n): ")? {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };

    let limit = parse_limit(&prompter.ask("How many to show? (blank for all): ")?);
    Ok((key, order, limit))
}

/// Positive whole number, anything else means "no limit".
fn parse_limit(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

fn ask_filters<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<FilterSet> {
    prompter.blank()?;
    let name = prompter.ask("Filter by name (blank for all): ")?;
    let mut filters = FilterSet::new().with_name(name);

    loop {
        prompter.blank()?;
        prompter.say("Filter on which metric?")?;
        prompter.say(render::metric_menu())?;
        let choice = prompter.ask("> ")?;
        let Some(key) = choice
            .parse::<usize>()
            .ok()
            .and_then(MetricKey::from_menu_choice)
        else {
            prompter.say("Invalid choice.")?;
            continue;
        };

        let min = ask_bound(prompter, &format!("Minimum {} (blank for none): ", key.as_str()))?;
        let max = ask_bound(prompter, &format!("Maximum {} (blank for none): ", key.as_str()))?;
        filters.set_range(key, RangeFilter::new(min, max));

        if !prompter.confirm("Add another condition? (y/n): ")? {
            return Ok(filters);
        }
    }
}

fn ask_bound<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    question: &str,
) -> io::Result<Option<f64>> {
    let raw = prompter.ask(question)?;
    match parse_bound(&raw) {
        Ok(bound) => Ok(bound),
        Err(err) => {
            prompter.say(format_args!("{err}; no bound applied."))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{SourceId, SourceStat};
    use std::io::Cursor;

    fn row(name: &str, correct: u32, incorrect: u32) -> MetricRow {
        let stat = SourceStat::from_persisted(correct, incorrect, vec![1; correct as usize]).unwrap();
        MetricRow::from_stat(SourceId::new(name).unwrap(), &stat)
    }

    fn rows() -> Vec<MetricRow> {
        vec![row("Lemon", 4, 0), row("Pretender", 1, 3), row("Marigold", 2, 2)]
    }

    fn browse_with(input: &str) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.to_owned()), Vec::new());
        browse(&mut prompter, rows()).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    fn order_of(out: &str) -> Vec<&str> {
        out.lines()
            .filter_map(|line| line.strip_prefix("# "))
            .collect()
    }

    #[test]
    fn ranking_defaults_to_accuracy_descending() {
        let out = browse_with("1\n9\nn\n\n");
        assert!(out.contains("Ranking by Accuracy"));
        assert_eq!(order_of(&out), ["Lemon", "Marigold", "Pretender"]);
    }

    #[test]
    fn ranking_ascending_with_limit() {
        let out = browse_with("1\n2\ny\n2\n");
        assert_eq!(order_of(&out), ["Lemon", "Marigold"]);
    }

    #[test]
    fn search_reprompts_invalid_metric_and_combines_ranges() {
        let out = browse_with("2\nr\n7\n4\n40\n\ny\n3\nabc\n4\nn\n");
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("no bound applied"));
        // name "r" matches Pretender and Marigold; accuracy >= 40 keeps Marigold.
        assert_eq!(order_of(&out), ["Marigold"]);
    }

    #[test]
    fn empty_search_result_is_reported() {
        let out = browse_with("2\nnothing\n1\n\n\nn\n");
        assert!(out.contains("No matching data found."));
        assert!(order_of(&out).is_empty());
    }

    #[test]
    fn unknown_mode_exits_quietly() {
        let out = browse_with("3\n");
        assert!(out.contains("Invalid choice. Exiting."));
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("0"), None);
        assert_eq!(parse_limit("x"), None);
        assert_eq!(parse_limit(" 3 "), Some(3));
    }
}
