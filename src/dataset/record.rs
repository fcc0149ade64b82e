//! Indicator records and the raw JSON translation layer.
//!
//! DESIGN
//! ======
//! The bundled indicator files use spreadsheet column headers as keys,
//! trailing spaces included. `RawIndicatorRecord` is the only type that knows
//! those names; everything past the `From` conversion works with the
//! normalized `IndicatorRecord`.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

// =============================================================================
// STATUS
// =============================================================================

/// Achievement status relative to the state average.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateAverageStatus {
    Above,
    Below,
    /// Any other label found in the source data.
    Other(String),
}

impl StateAverageStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Above => "Above",
            Self::Below => "Below",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub fn is_above(&self) -> bool {
        matches!(self, Self::Above)
    }
}

impl From<String> for StateAverageStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Above" => Self::Above,
            "Below" => Self::Below,
            _ => Self::Other(label),
        }
    }
}

impl Serialize for StateAverageStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StateAverageStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One row of indicator data for a single administrative block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRecord {
    pub block: String,
    pub district: String,
    /// Achievement percentage for the current period (Mar 2025).
    pub achievement_current: f64,
    /// Achievement percentage for the prior period (Mar 2024).
    pub achievement_prior: f64,
    /// Period-over-period change as reported by the source.
    pub change: f64,
    pub rank_current: u32,
    pub rank_prior: u32,
    pub score_current: f64,
    pub score_prior: f64,
    pub status: StateAverageStatus,
}

impl IndicatorRecord {
    /// Difference between the two periods' achievement values.
    ///
    /// Computed rather than read from `change`, which the source rounds.
    #[must_use]
    pub fn improvement(&self) -> f64 {
        self.achievement_current - self.achievement_prior
    }
}

/// Wire shape of an indicator row in the bundled JSON.
#[derive(Debug, Deserialize)]
pub(crate) struct RawIndicatorRecord {
    #[serde(rename = "Blocks")]
    block: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Achievement (Mar, 25) ")]
    achievement_current: f64,
    #[serde(rename = "Achievement (Mar, 24) ")]
    achievement_prior: f64,
    #[serde(rename = "Change ")]
    change: f64,
    #[serde(rename = "Absolute Rank (Mar, 25) ")]
    rank_current: u32,
    #[serde(rename = "Absolute Rank (Mar, 24) ")]
    rank_prior: u32,
    #[serde(rename = "Absolute Score (Mar, 25) ")]
    score_current: f64,
    #[serde(rename = "Absolute Score (Mar, 24) ")]
    score_prior: f64,
    #[serde(rename = "Achievement (Mar, 25 ) Status w.r.t. State Average (Mar,25 ) ")]
    status: StateAverageStatus,
}

impl From<RawIndicatorRecord> for IndicatorRecord {
    fn from(raw: RawIndicatorRecord) -> Self {
        Self {
            block: raw.block,
            district: raw.district,
            achievement_current: raw.achievement_current,
            achievement_prior: raw.achievement_prior,
            change: raw.change,
            rank_current: raw.rank_current,
            rank_prior: raw.rank_prior,
            score_current: raw.score_current,
            score_prior: raw.score_prior,
            status: raw.status,
        }
    }
}

/// Parse a JSON array of raw indicator rows into typed records.
///
/// # Errors
///
/// Returns the `serde_json` error when the document is not an array of
/// well-formed indicator rows.
pub fn parse_records(json: &str) -> Result<Vec<IndicatorRecord>, serde_json::Error> {
    let raw: Vec<RawIndicatorRecord> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(IndicatorRecord::from).collect())
}
