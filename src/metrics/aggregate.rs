//! Headline aggregates for a dataset.
//!
//! Means over an empty slice are `NaN` (0 / 0). The dashboard has always
//! rendered that as-is; callers that need a number must check `total` first.

use serde::Serialize;

use crate::dataset::IndicatorRecord;

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod aggregate_test;

/// Headline numbers for the selected dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub mean_achievement: f64,
    pub mean_prior_achievement: f64,
    pub mean_change: f64,
    pub mean_score: f64,
    /// Records whose status is exactly "Above".
    pub above_count: usize,
}

impl Summary {
    /// Share of blocks above the state average, as a percentage.
    #[must_use]
    pub fn above_rate(&self) -> f64 {
        ratio(self.above_count, self.total) * 100.0
    }
}

#[must_use]
pub fn summarize(records: &[IndicatorRecord]) -> Summary {
    Summary {
        total: records.len(),
        mean_achievement: mean_of(records, |r| r.achievement_current),
        mean_prior_achievement: mean_of(records, |r| r.achievement_prior),
        mean_change: mean_of(records, |r| r.change),
        mean_score: mean_of(records, |r| r.score_current),
        above_count: records.iter().filter(|r| r.status.is_above()).count(),
    }
}

/// Arithmetic mean of `field` across `records`; `NaN` when empty.
pub fn mean_of<F>(records: &[IndicatorRecord], field: F) -> f64
where
    F: Fn(&IndicatorRecord) -> f64,
{
    let sum: f64 = records.iter().map(field).sum();
    sum / count_f64(records.len())
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn count_f64(n: usize) -> f64 {
    n as f64
}

pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    count_f64(part) / count_f64(whole)
}
