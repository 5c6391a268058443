use std::fmt;
use thiserror::Error;

/// Longest span the sampler may reveal in a single pick.
pub const MAX_SPAN_LEN: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpanError {
    #[error("span end ({end}) must be greater than start ({start})")]
    Empty { start: usize, end: usize },

    #[error("span length {len} exceeds the maximum of {max}", max = MAX_SPAN_LEN)]
    TooLong { len: usize },

    #[error("span end ({end}) is past the corpus length ({corpus_len})")]
    OutOfBounds { end: usize, corpus_len: usize },
}

/// Half-open interval `[start, end)` over corpus line indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span over a corpus of `corpus_len` lines.
    ///
    /// # Errors
    ///
    /// Returns `SpanError` if the span is empty, longer than `MAX_SPAN_LEN`,
    /// or reaches past the end of the corpus.
    pub fn new(start: usize, end: usize, corpus_len: usize) -> Result<Self, SpanError> {
        if end <= start {
            return Err(SpanError::Empty { start, end });
        }
        let len = end - start;
        if len > MAX_SPAN_LEN {
            return Err(SpanError::TooLong { len });
        }
        if end > corpus_len {
            return Err(SpanError::OutOfBounds { end, corpus_len });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: a span holds at least one line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when the two spans share at least one line.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span[{}, {})", self.start, self.end)
    }
}

/// Renders 1-based inclusive line numbers, e.g. `3-5`.
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_bounds() {
        assert!(Span::new(0, 1, 1).is_ok());
        assert_eq!(
            Span::new(2, 2, 5).unwrap_err(),
            SpanError::Empty { start: 2, end: 2 }
        );
        assert_eq!(Span::new(0, 4, 10).unwrap_err(), SpanError::TooLong { len: 4 });
        assert_eq!(
            Span::new(4, 6, 5).unwrap_err(),
            SpanError::OutOfBounds {
                end: 6,
                corpus_len: 5
            }
        );
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        let a = Span::new(0, 2, 10).unwrap();
        let b = Span::new(2, 4, 10).unwrap();
        let c = Span::new(1, 3, 10).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn displays_one_based_lines() {
        let span = Span::new(2, 5, 10).unwrap();
        assert_eq!(span.to_string(), "3-5");
    }
}
