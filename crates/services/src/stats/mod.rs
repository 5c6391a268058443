mod queries;
mod service;

pub use crate::error::StatsError;
pub use queries::{
    FilterSet, RangeFilter, SortOrder, filter_rows, limit_rows, parse_bound, sort_rows,
};
pub use service::StatsService;
