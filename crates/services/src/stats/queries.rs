//! Sorting, filtering and limiting of derived metric rows.

use std::collections::BTreeMap;

use quiz_core::model::{MetricKey, MetricRow};

use crate::error::InputError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Stable sort by `key`; rows with equal values keep their input order.
#[must_use]
pub fn sort_rows(mut rows: Vec<MetricRow>, key: MetricKey, order: SortOrder) -> Vec<MetricRow> {
    rows.sort_by(|a, b| {
        let ord = a.value(key).total_cmp(&b.value(key));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    rows
}

/// Keep the first `limit` rows; `None` keeps all of them.
#[must_use]
pub fn limit_rows(mut rows: Vec<MetricRow>, limit: Option<usize>) -> Vec<MetricRow> {
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Inclusive `min <= value <= max` bound; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    #[must_use]
    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Parse one optional bound typed by the operator. Blank input means "no bound".
///
/// # Errors
///
/// Returns `InputError::InvalidInput` for text that is not a non-negative number.
pub fn parse_bound(raw: &str) -> Result<Option<f64>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(InputError::InvalidInput {
            field: "bound",
            raw: trimmed.to_owned(),
        }),
    }
}

/// Conjunction of per-metric ranges and an optional name substring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    name_contains: Option<String>,
    ranges: BTreeMap<MetricKey, RangeFilter>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on the source name. Blank text clears it.
    #[must_use]
    pub fn with_name(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let needle = needle.trim();
        self.name_contains = (!needle.is_empty()).then(|| needle.to_lowercase());
        self
    }

    /// Constrain `key`; a later range for the same key replaces the earlier one.
    #[must_use]
    pub fn with_range(mut self, key: MetricKey, range: RangeFilter) -> Self {
        self.set_range(key, range);
        self
    }

    pub fn set_range(&mut self, key: MetricKey, range: RangeFilter) {
        self.ranges.insert(key, range);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_none() && self.ranges.is_empty()
    }

    #[must_use]
    pub fn matches(&self, row: &MetricRow) -> bool {
        if let Some(needle) = &self.name_contains {
            if !row.source.as_str().to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        self.ranges
            .iter()
            .all(|(key, range)| range.contains(row.value(*key)))
    }
}

/// Rows satisfying every constraint in `filters`, in input order.
#[must_use]
pub fn filter_rows(rows: Vec<MetricRow>, filters: &FilterSet) -> Vec<MetricRow> {
    rows.into_iter().filter(|row| filters.matches(row)).collect()
}
