mod console;
mod picker;
mod prompt;
mod render;
mod viewer;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use services::quiz::EndReason;
use services::{Clock, MissingCorpusPolicy, QuizConfig, QuizLoopService, StatsService};
use storage::Storage;
use storage::fs::{StoragePaths, render_summary};
use tracing_subscriber::EnvFilter;

use crate::console::TerminalConsole;
use crate::prompt::Prompter;

/// Guess which song a few masked lines came from.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding one `.txt` file per song
    #[arg(long, global = true, env = "QUIZ_CORPUS_DIR", default_value = "songs")]
    corpus_dir: PathBuf,

    /// Cumulative stats file (JSON)
    #[arg(
        long = "stats",
        global = true,
        env = "QUIZ_STATS_PATH",
        default_value = "quiz_stats.json"
    )]
    stats_file: PathBuf,

    /// Where the last session's summary is written
    #[arg(
        long = "summary",
        global = true,
        env = "QUIZ_SUMMARY_PATH",
        default_value = "session_summary.txt"
    )]
    summary_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn storage_paths(&self) -> StoragePaths {
        StoragePaths {
            corpus_dir: self.corpus_dir.clone(),
            stats_file: self.stats_file.clone(),
            summary_file: self.summary_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Play a quiz session (default)
    Play(PlayArgs),
    /// Browse cumulative statistics
    Stats,
    /// Pick a random song and optionally print it
    Pick,
}

impl Default for Command {
    fn default() -> Self {
        Self::Play(PlayArgs::default())
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
struct PlayArgs {
    /// Rounds per session
    #[arg(long, default_value_t = QuizConfig::default().rounds)]
    rounds: u32,

    /// Maximum reveals per round
    #[arg(long, default_value_t = QuizConfig::default().max_reveals)]
    reveals: u32,

    /// What to do when a picked song cannot be read: `end` or `skip`
    #[arg(long, default_value_t = MissingCorpusPolicy::default())]
    on_missing_corpus: MissingCorpusPolicy,
}

impl Default for PlayArgs {
    fn default() -> Self {
        let config = QuizConfig::default();
        Self {
            rounds: config.rounds,
            reveals: config.max_reveals,
            on_missing_corpus: config.missing_corpus,
        }
    }
}

impl PlayArgs {
    fn config(&self) -> QuizConfig {
        QuizConfig::default()
            .with_rounds(self.rounds)
            .with_max_reveals(self.reveals)
            .with_missing_corpus(self.on_missing_corpus)
    }
}

fn init_tracing() {
    // Logs go to stderr so prompts on stdout stay readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn play<R: BufRead, W: Write>(
    storage: &Storage,
    config: QuizConfig,
    prompter: Prompter<R, W>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut console = TerminalConsole::new(prompter);
    let report = QuizLoopService::new(Clock::system(), config, storage).run(&mut console)?;

    let out = console.prompter();
    match report.ended_early {
        Some(EndReason::NoSources) => out.say("\nNo songs were found; the session ended early.")?,
        Some(EndReason::SourceUnavailable) => {
            out.say("\nA song could not be read; the session ended early.")?;
        }
        None => {}
    }
    if !report.skipped_rounds.is_empty() {
        let skipped: Vec<String> = report.skipped_rounds.iter().map(u32::to_string).collect();
        out.say(format_args!("Skipped rounds: {}", skipped.join(", ")))?;
    }
    out.blank()?;
    out.say(render_summary(&report.summary).trim_end())?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::files(&cli.storage_paths());
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());

    match cli.command.unwrap_or_default() {
        Command::Play(args) => play(&storage, args.config(), prompter),
        Command::Stats => viewer::run(&mut prompter, &StatsService::new(Arc::clone(&storage.stats))),
        Command::Pick => picker::run(&mut prompter, &*storage.corpus, &mut rand::rng()),
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        // Report once here; lower layers only propagate.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
