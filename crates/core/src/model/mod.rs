pub mod answer;
mod corpus;
mod metrics;
mod session;
mod source;
mod span;
mod stats;

pub use answer::{AnswerMatch, classify, normalize};
pub use corpus::{Corpus, MASK, mask_occurrences};
pub use metrics::{MetricKey, MetricKeyError, MetricRow, compute_metrics};
pub use session::{
    BASE_POINTS, POINTS_PER_EXTRA_REVEAL, RoundResult, SessionSummary, SessionSummaryError,
    round_score,
};
pub use source::{SourceId, SourceIdError};
pub use span::{MAX_SPAN_LEN, Span, SpanError};
pub use stats::{SourceStat, SourceStatError, StatsStore};
