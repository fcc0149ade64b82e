//! Bundled indicator datasets.
//!
//! SYSTEM CONTEXT
//! ==============
//! The indicator files ship inside the binary and are parsed once at
//! startup into a `Catalog`. Nothing writes to them afterwards; handlers and
//! the insights responder share the catalog through an `Arc`.

pub mod record;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use record::{IndicatorRecord, StateAverageStatus};


const HYPERTENSION_JSON: &str = include_str!("../../data/hypertension.json");
const LOW_BIRTH_WEIGHT_JSON: &str = include_str!("../../data/low_birth_weight.json");

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset {key} failed to parse: {source}")]
    Parse {
        key: DatasetKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown dataset: {0}")]
    UnknownKey(String),
}

// =============================================================================
// KEY
// =============================================================================

/// Identifies one of the bundled indicator datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKey {
    #[default]
    Hypertension,
    LowBirthWeight,
}

impl DatasetKey {
    pub const ALL: [Self; 2] = [Self::Hypertension, Self::LowBirthWeight];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hypertension => "hypertension",
            Self::LowBirthWeight => "low_birth_weight",
        }
    }

    /// Dashboard heading for the dataset.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Hypertension => "Hypertension Management",
            Self::LowBirthWeight => "Low Birth Weight Prevention",
        }
    }

    /// Short phrase used in assistant answers.
    #[must_use]
    pub fn topic(self) -> &'static str {
        match self {
            Self::Hypertension => "hypertension management",
            Self::LowBirthWeight => "low birth weight prevention",
        }
    }

    /// Full indicator definition.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Hypertension => {
                "Percentage of persons screened for hypertension against targeted population in the Block"
            }
            Self::LowBirthWeight => "Percentage of low-birth weight babies (less than 2500g)",
        }
    }

    fn bundled_json(self) -> &'static str {
        match self {
            Self::Hypertension => HYPERTENSION_JSON,
            Self::LowBirthWeight => LOW_BIRTH_WEIGHT_JSON,
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKey {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DatasetError::UnknownKey(s.to_owned()))
    }
}

// =============================================================================
// DATASET + CATALOG
// =============================================================================

/// A parsed indicator dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub key: DatasetKey,
    pub records: Vec<IndicatorRecord>,
}

impl Dataset {
    /// First record whose block name matches exactly.
    #[must_use]
    pub fn find_block(&self, name: &str) -> Option<&IndicatorRecord> {
        self.records.iter().find(|r| r.block == name)
    }
}

/// All datasets available to the dashboard.
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: Vec<Dataset>,
}

impl Catalog {
    /// Parse the datasets embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Parse`] if a bundled file is malformed.
    pub fn bundled() -> Result<Self, DatasetError> {
        let datasets = DatasetKey::ALL
            .into_iter()
            .map(|key| {
                record::parse_records(key.bundled_json())
                    .map(|records| Dataset { key, records })
                    .map_err(|source| DatasetError::Parse { key, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { datasets })
    }

    /// Build a catalog from already-parsed datasets.
    #[must_use]
    pub fn from_datasets(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }

    #[must_use]
    pub fn get(&self, key: DatasetKey) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }
}
