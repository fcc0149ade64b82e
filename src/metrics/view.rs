//! Dashboard view model.
//!
//! SYSTEM CONTEXT
//! ==============
//! `GET /api/datasets/{key}/dashboard` serializes a `DashboardView` built
//! fresh from the dataset on every call. The front end renders cards, gauges
//! and charts straight from it without further arithmetic.

use serde::Serialize;

use super::aggregate::{Summary, summarize};
use super::district::{DistrictBucket, group_by_district};
use crate::dataset::{Dataset, DatasetKey, IndicatorRecord};

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

const ACHIEVEMENT_GAUGE_MAX: f64 = 200.0;
const SCORE_GAUGE_MAX: f64 = 100.0;
const CHANGE_GAUGE_MAX: f64 = 200.0;
const COMPLIANCE_GAUGE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeColor {
    Blue,
    Green,
    Red,
    Orange,
}

/// One radial gauge on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub title: &'static str,
    pub value: f64,
    pub max: f64,
    pub unit: &'static str,
    pub color: GaugeColor,
    pub highlighted: bool,
    pub percent_of_target: f64,
}

impl Gauge {
    fn new(title: &'static str, value: f64, max: f64, unit: &'static str, color: GaugeColor) -> Self {
        Self { title, value, max, unit, color, highlighted: false, percent_of_target: percent_of_target(value, max) }
    }
}

/// Fill level of a gauge, capped at 100. `NaN` (empty dataset) passes
/// through instead of reading as a full gauge.
#[must_use]
pub fn percent_of_target(value: f64, max: f64) -> f64 {
    let pct = value / max * 100.0;
    if pct.is_nan() { pct } else { pct.min(100.0) }
}

/// One point of the period-over-period trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub block: String,
    pub district: String,
    pub prior: f64,
    pub current: f64,
}

/// District slice for the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    #[serde(flatten)]
    pub bucket: DistrictBucket,
    pub value: f64,
}

/// Everything the dashboard needs for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub key: DatasetKey,
    pub title: &'static str,
    pub description: &'static str,
    pub summary: Summary,
    pub above_rate: f64,
    pub gauges: Vec<Gauge>,
    pub districts: Vec<DistributionSlice>,
    pub trend: Vec<TrendPoint>,
    pub blocks: Vec<IndicatorRecord>,
}

/// Recompute the dashboard for `dataset`.
#[must_use]
pub fn dashboard_view(dataset: &Dataset) -> DashboardView {
    let records = &dataset.records;
    let summary = summarize(records);

    DashboardView {
        key: dataset.key,
        title: dataset.key.title(),
        description: dataset.key.description(),
        summary,
        above_rate: summary.above_rate(),
        gauges: gauges(&summary),
        districts: group_by_district(records)
            .into_iter()
            .map(|bucket| DistributionSlice { value: bucket.rounded_value(), bucket })
            .collect(),
        trend: records
            .iter()
            .map(|r| TrendPoint {
                block: r.block.clone(),
                district: r.district.clone(),
                prior: r.achievement_prior,
                current: r.achievement_current,
            })
            .collect(),
        blocks: records.clone(),
    }
}

fn gauges(summary: &Summary) -> Vec<Gauge> {
    let change_color = if summary.mean_change >= 0.0 { GaugeColor::Green } else { GaugeColor::Red };
    let mut compliance = Gauge::new(
        "State Compliance",
        summary.above_rate(),
        COMPLIANCE_GAUGE_MAX,
        "%",
        GaugeColor::Orange,
    );
    compliance.highlighted = true;

    vec![
        Gauge::new("Achievement Score", summary.mean_achievement, ACHIEVEMENT_GAUGE_MAX, "%", GaugeColor::Blue),
        Gauge::new("Absolute Score", summary.mean_score, SCORE_GAUGE_MAX, "pts", GaugeColor::Green),
        Gauge::new("Performance Change", summary.mean_change.abs(), CHANGE_GAUGE_MAX, "Δ%", change_color),
        compliance,
    ]
}
