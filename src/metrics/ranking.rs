//! Performer selection and period-over-period comparison.

use serde::Serialize;

use super::aggregate::ratio;
use crate::dataset::IndicatorRecord;

#[cfg(test)]
#[path = "ranking_test.rs"]
mod ranking_test;

/// Records ordered by current achievement. Stable: ties keep input order.
#[must_use]
pub fn sorted_by_achievement(records: &[IndicatorRecord], descending: bool) -> Vec<&IndicatorRecord> {
    let mut sorted: Vec<&IndicatorRecord> = records.iter().collect();
    if descending {
        sorted.sort_by(|a, b| b.achievement_current.total_cmp(&a.achievement_current));
    } else {
        sorted.sort_by(|a, b| a.achievement_current.total_cmp(&b.achievement_current));
    }
    sorted
}

/// Block with the highest current achievement.
#[must_use]
pub fn top_performer(records: &[IndicatorRecord]) -> Option<&IndicatorRecord> {
    sorted_by_achievement(records, true).first().copied()
}

/// Block with the lowest current achievement.
#[must_use]
pub fn worst_performer(records: &[IndicatorRecord]) -> Option<&IndicatorRecord> {
    sorted_by_achievement(records, false).first().copied()
}

/// How many blocks moved up, down, or held between the two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub improved: usize,
    pub declined: usize,
    pub stable: usize,
    pub total: usize,
}

impl PeriodComparison {
    #[must_use]
    pub fn improved_pct(&self) -> f64 {
        ratio(self.improved, self.total) * 100.0
    }

    #[must_use]
    pub fn declined_pct(&self) -> f64 {
        ratio(self.declined, self.total) * 100.0
    }

    #[must_use]
    pub fn stable_pct(&self) -> f64 {
        ratio(self.stable, self.total) * 100.0
    }
}

/// Classify each block by the sign of its reported `change`.
#[must_use]
pub fn compare_periods(records: &[IndicatorRecord]) -> PeriodComparison {
    let improved = records.iter().filter(|r| r.change > 0.0).count();
    let declined = records.iter().filter(|r| r.change < 0.0).count();
    PeriodComparison { improved, declined, stable: records.len() - improved - declined, total: records.len() }
}
