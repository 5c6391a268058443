//! Random selection of non-overlapping line spans.
//!
//! Each pick draws a span length uniformly from `1..=MAX_SPAN_LEN`, then tries
//! up to [`MAX_ATTEMPTS`] random start positions until one does not overlap any
//! previously accepted span. When no position is found the caller stops
//! revealing; this is a soft halt, not an error.

use rand::Rng;

use crate::model::{MAX_SPAN_LEN, Span};

/// Start positions tried per pick before giving up.
pub const MAX_ATTEMPTS: usize = 100;

/// Outcome of a single pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Span(Span),
    /// The drawn length is longer than the whole corpus.
    CorpusTooShort { needed: usize, available: usize },
    /// Every attempt overlapped an accepted span.
    Exhausted,
}

impl Pick {
    #[must_use]
    pub fn span(self) -> Option<Span> {
        match self {
            Pick::Span(span) => Some(span),
            Pick::CorpusTooShort { .. } | Pick::Exhausted => None,
        }
    }
}

/// Draw one span over `[0, corpus_len)` that avoids every span in `accepted`.
pub fn next_span<R: Rng + ?Sized>(rng: &mut R, corpus_len: usize, accepted: &[Span]) -> Pick {
    let len = rng.random_range(1..=MAX_SPAN_LEN);
    if corpus_len < len {
        return Pick::CorpusTooShort {
            needed: len,
            available: corpus_len,
        };
    }

    for _ in 0..MAX_ATTEMPTS {
        let start = rng.random_range(0..=corpus_len - len);
        let Ok(candidate) = Span::new(start, start + len, corpus_len) else {
            continue;
        };
        if !accepted.iter().any(|taken| taken.overlaps(&candidate)) {
            return Pick::Span(candidate);
        }
    }
    Pick::Exhausted
}

/// Pick up to `max_picks` pairwise non-overlapping spans.
///
/// Stops early, returning what was accepted so far, as soon as a pick fails.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, corpus_len: usize, max_picks: usize) -> Vec<Span> {
    let mut accepted = Vec::with_capacity(max_picks.min(corpus_len));
    while accepted.len() < max_picks {
        match next_span(rng, corpus_len, &accepted) {
            Pick::Span(span) => accepted.push(span),
            Pick::CorpusTooShort { .. } | Pick::Exhausted => break,
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spans_stay_in_bounds() {
        for seed in 0..200_u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus_len = 1 + (seed as usize % 40);
            for span in sample(&mut rng, corpus_len, 8) {
                assert!(span.start() < span.end());
                assert!(span.end() <= corpus_len);
                assert!((1..=MAX_SPAN_LEN).contains(&span.len()));
            }
        }
    }

    #[test]
    fn accepted_spans_never_overlap() {
        for seed in 0..200_u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spans = sample(&mut rng, 12, 10);
            for (i, a) in spans.iter().enumerate() {
                for b in &spans[i + 1..] {
                    assert!(
                        a.end() <= b.start() || a.start() >= b.end(),
                        "seed {seed}: {a:?} overlaps {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn returns_at_most_max_picks() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample(&mut rng, 500, 3).len(), 3);
        assert!(sample(&mut rng, 500, 0).is_empty());
    }

    #[test]
    fn empty_corpus_halts_immediately() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample(&mut rng, 0, 3).is_empty());
        assert!(matches!(
            next_span(&mut rng, 0, &[]),
            Pick::CorpusTooShort { available: 0, .. }
        ));
    }

    #[test]
    fn full_corpus_exhausts_instead_of_looping() {
        let mut rng = StdRng::seed_from_u64(3);
        let taken = [Span::new(0, 3, 6).unwrap(), Span::new(3, 6, 6).unwrap()];
        for _ in 0..20 {
            let pick = next_span(&mut rng, 6, &taken);
            assert!(pick.span().is_none(), "unexpected {pick:?}");
        }
    }

    #[test]
    fn single_line_corpus_yields_at_most_one_span() {
        for seed in 0..50_u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spans = sample(&mut rng, 1, 3);
            assert!(spans.len() <= 1);
            if let Some(span) = spans.first() {
                assert_eq!((span.start(), span.end()), (0, 1));
            }
        }
    }
}
