//! District buckets for the distribution view.
//!
//! Buckets come out in the order each district is first seen while scanning.
//! The distribution chart relies on that order for its colour assignment.

use serde::Serialize;

use super::aggregate::count_f64;
use crate::dataset::IndicatorRecord;

#[cfg(test)]
#[path = "district_test.rs"]
mod district_test;

/// Records sharing one district value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictBucket {
    pub district: String,
    pub mean_achievement: f64,
    pub count: usize,
}

impl DistrictBucket {
    /// Mean rounded to a whole percentage, as the chart labels show it.
    #[must_use]
    pub fn rounded_value(&self) -> f64 {
        self.mean_achievement.round()
    }
}

/// Group records by exact district string, preserving first-encounter order.
#[must_use]
pub fn group_by_district(records: &[IndicatorRecord]) -> Vec<DistrictBucket> {
    // (district, sum, count); linear lookup keeps insertion order and the
    // district count is tiny.
    let mut acc: Vec<(&str, f64, usize)> = Vec::new();
    for rec in records {
        match acc.iter_mut().find(|(name, _, _)| *name == rec.district) {
            Some(entry) => {
                entry.1 += rec.achievement_current;
                entry.2 += 1;
            }
            None => acc.push((rec.district.as_str(), rec.achievement_current, 1)),
        }
    }

    acc.into_iter()
        .map(|(district, sum, count)| DistrictBucket {
            district: district.to_owned(),
            mean_achievement: sum / count_f64(count),
            count,
        })
        .collect()
}

/// Buckets sorted by mean achievement, best first. Ties keep input order.
#[must_use]
pub fn rank_districts(records: &[IndicatorRecord]) -> Vec<DistrictBucket> {
    let mut buckets = group_by_district(records);
    buckets.sort_by(|a, b| b.mean_achievement.total_cmp(&a.mean_achievement));
    buckets
}
