use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented prompts over any reader/writer pair.
///
/// Stdin/stdout in the binary, `Cursor`/`Vec<u8>` in tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` without a newline and read one trimmed line back.
    ///
    /// A closed input is an `UnexpectedEof` error so loops waiting on the
    /// operator cannot spin forever.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_owned())
    }

    /// y/n question; only `y` or `yes` counts as yes.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
