use thiserror::Error;

use crate::model::{MetricKeyError, SessionSummaryError, SourceIdError, SourceStatError, SpanError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    SourceId(#[from] SourceIdError),
    #[error(transparent)]
    Span(#[from] SpanError),
    #[error(transparent)]
    SourceStat(#[from] SourceStatError),
    #[error(transparent)]
    MetricKey(#[from] MetricKeyError),
    #[error(transparent)]
    SessionSummary(#[from] SessionSummaryError),
}
