use crate::model::{SourceId, Span};

/// Replacement shown in place of the source name inside revealed lines.
pub const MASK: &str = "*****";

/// Ordered, non-blank lines of one quiz source.
///
/// Lines keep their original text (minus the line terminator). The corpus is
/// immutable for the lifetime of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    source: SourceId,
    lines: Vec<String>,
}

impl Corpus {
    /// Build a corpus from raw file text, skipping blank lines.
    #[must_use]
    pub fn from_text(source: SourceId, text: &str) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect();
        Self { source, lines }
    }

    #[must_use]
    pub fn source(&self) -> &SourceId {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn all_lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines covered by `span`.
    ///
    /// Returns an empty slice if the span was built for a longer corpus.
    #[must_use]
    pub fn lines(&self, span: Span) -> &[String] {
        self.lines.get(span.start()..span.end()).unwrap_or(&[])
    }

    /// Lines covered by `span` with every case-insensitive occurrence of the
    /// source name replaced by [`MASK`].
    #[must_use]
    pub fn masked_lines(&self, span: Span) -> Vec<String> {
        self.lines(span)
            .iter()
            .map(|line| mask_occurrences(line, self.source.as_str()))
            .collect()
    }
}

/// Replace every case-insensitive occurrence of `needle` in `line` with [`MASK`].
#[must_use]
pub fn mask_occurrences(line: &str, needle: &str) -> String {
    if needle.is_empty() {
        return line.to_owned();
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(first) = rest.chars().next() {
        if let Some(matched) = prefix_match_len(rest, needle) {
            out.push_str(MASK);
            rest = &rest[matched..];
        } else {
            out.push(first);
            rest = &rest[first.len_utf8()..];
        }
    }
    out
}

// Byte length of the prefix of `hay` that equals `needle` ignoring case.
fn prefix_match_len(hay: &str, needle: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut hay_chars = hay.chars();
    for n in needle.chars() {
        let h = hay_chars.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        consumed += h.len_utf8();
    }
    Some(consumed)
}
