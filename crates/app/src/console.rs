use std::io::{self, BufRead, Write};

use quiz_core::model::AnswerMatch;
use services::quiz::{QuizConsole, QuizError, Reveal, RevealChoice, RevealHalt, RoundOutcome};

use crate::prompt::Prompter;

/// Interactive quiz console on a terminal.
pub struct TerminalConsole<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(prompter: Prompter<R, W>) -> Self {
        Self { prompter }
    }

    pub fn prompter(&mut self) -> &mut Prompter<R, W> {
        &mut self.prompter
    }
}

impl<R: BufRead, W: Write> QuizConsole for TerminalConsole<R, W> {
    fn round_started(&mut self, round: u32, rounds: u32, corpus_len: usize) -> io::Result<()> {
        self.prompter.blank()?;
        self.prompter.say(format_args!("=== Round {round} of {rounds} ==="))?;
        self.prompter
            .say(format_args!("Quiz started ({corpus_len} usable lines)"))
    }

    fn choose(&mut self, next_reveal: u32) -> io::Result<RevealChoice> {
        let raw = self.prompter.ask(&format!(
            "\nPress Enter to show reveal #{next_reveal}, or 'a' to answer: "
        ))?;
        Ok(if raw.eq_ignore_ascii_case("a") {
            RevealChoice::AnswerNow
        } else {
            RevealChoice::Reveal
        })
    }

    fn show_reveal(&mut self, reveal: &Reveal) -> io::Result<()> {
        self.prompter.blank()?;
        self.prompter.say(format_args!(
            "--- Reveal {} (lines {}) ---",
            reveal.number, reveal.span
        ))?;
        for line in &reveal.masked {
            self.prompter.say(line)?;
        }
        self.prompter.say("--- end ---")
    }

    fn reveal_halted(&mut self, halt: RevealHalt) -> io::Result<()> {
        match halt {
            RevealHalt::LimitReached => Ok(()),
            other => self.prompter.say(format_args!("No more reveals: {other}.")),
        }
    }

    fn ask_answer(&mut self) -> io::Result<String> {
        self.prompter.blank()?;
        self.prompter.say("Answer mode.")?;
        self.prompter
            .ask("Which source is this? (name without extension): ")
    }

    fn show_outcome(&mut self, outcome: &RoundOutcome) -> io::Result<()> {
        let source = outcome.source();
        match outcome.verdict() {
            AnswerMatch::Exact => self
                .prompter
                .say(format_args!("Exact match! The answer is \"{source}\"."))?,
            AnswerMatch::Fuzzy => self.prompter.say(format_args!(
                "Close match (punctuation or case differs). The answer is \"{source}\"."
            ))?,
            AnswerMatch::Wrong => self
                .prompter
                .say(format_args!("Wrong. The answer was \"{source}\"."))?,
        }

        self.prompter.blank()?;
        self.prompter.say("--- Revealed text ---")?;
        for entry in &outcome.transcript {
            self.prompter.blank()?;
            self.prompter.say(format_args!(
                "[Reveal {}: lines {}]",
                entry.number, entry.span
            ))?;
            for line in &entry.lines {
                self.prompter.say(line)?;
            }
        }
        self.prompter.say("--- end ---")?;

        let result = &outcome.result;
        if result.succeeded() {
            self.prompter.say(format_args!(
                "Correct after {} reveal(s). Score: {}",
                result.display_count, result.score
            ))
        } else {
            self.prompter.say("Incorrect. Score: 0")
        }
    }

    fn round_failed(&mut self, round: u32, error: &QuizError) -> io::Result<()> {
        self.prompter
            .say(format_args!("Round {round} could not be played: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Corpus, SourceId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use services::quiz::{QuizRound, RevealStep};
    use std::io::Cursor;

    fn console(input: &str) -> TerminalConsole<Cursor<String>, Vec<u8>> {
        TerminalConsole::new(Prompter::new(Cursor::new(input.to_owned()), Vec::new()))
    }

    fn output(console: TerminalConsole<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(console.prompter.into_output()).unwrap()
    }

    #[test]
    fn only_a_switches_to_answer_mode() {
        let mut console = console("\nA\nx\n");
        assert_eq!(console.choose(1).unwrap(), RevealChoice::Reveal);
        assert_eq!(console.choose(2).unwrap(), RevealChoice::AnswerNow);
        assert_eq!(console.choose(3).unwrap(), RevealChoice::Reveal);
    }

    #[test]
    fn prints_masked_reveal_and_full_transcript() {
        let source = SourceId::new("Lemon").unwrap();
        let text: String = (1..=20).map(|i| format!("Lemon line {i}\n")).collect();
        let mut round = QuizRound::new(Corpus::from_text(source, &text), 3);
        let mut rng = StdRng::seed_from_u64(3);

        let mut console = console("");
        let RevealStep::Revealed(reveal) = round.reveal_next(&mut rng).unwrap() else {
            panic!("expected a reveal");
        };
        console.show_reveal(&reveal).unwrap();
        let outcome = round.answer("lemon").unwrap().clone();
        console.show_outcome(&outcome).unwrap();

        let out = output(console);
        assert!(out.contains("--- Reveal 1 (lines "));
        assert!(out.contains("***** line"));
        assert!(out.contains("Exact match! The answer is \"Lemon\"."));
        assert!(out.contains("[Reveal 1: lines "));
        assert!(out.contains("Lemon line"));
        assert!(out.contains("Correct after 1 reveal(s). Score: 10"));
    }

    #[test]
    fn limit_halt_is_quiet() {
        let mut console = console("");
        console.reveal_halted(RevealHalt::LimitReached).unwrap();
        console.reveal_halted(RevealHalt::Exhausted).unwrap();
        let out = output(console);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("No more reveals"));
    }
}
