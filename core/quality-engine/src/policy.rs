//! FILENAME: core/quality-engine/src/policy.rs
//! Health bands for observability metrics.

use std::path::Path;

use recon_engine::log_debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Display classification of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Healthy,
    Warning,
    Critical,
}

/// Bands for metrics where higher is better (scores, compliance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBands {
    /// Values at or above this are healthy.
    pub healthy_min: f64,
    /// Values at or above this (and below `healthy_min`) are a warning.
    pub warning_min: f64,
}

impl ScoreBands {
    pub fn classify(&self, value: f64) -> HealthBand {
        if value >= self.healthy_min {
            HealthBand::Healthy
        } else if value >= self.warning_min {
            HealthBand::Warning
        } else {
            HealthBand::Critical
        }
    }
}

/// Bands for metrics where closer to zero is better. The sign is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationBands {
    pub healthy_max: f64,
    pub warning_max: f64,
}

impl DeviationBands {
    pub fn classify(&self, value: f64) -> HealthBand {
        let magnitude = value.abs();
        if magnitude <= self.healthy_max {
            HealthBand::Healthy
        } else if magnitude <= self.warning_max {
            HealthBand::Warning
        } else {
            HealthBand::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityPolicy {
    /// Percent of healthy tables.
    #[serde(default = "default_schema_health")]
    pub schema_health: ScoreBands,

    /// Average SLA compliance percent.
    #[serde(default = "default_sla_compliance")]
    pub sla_compliance: ScoreBands,

    /// Percent deviation of row counts from expectation.
    #[serde(default = "default_volume_deviation")]
    pub volume_deviation: DeviationBands,

    /// Percent of null values in a column.
    #[serde(default = "default_null_percentage")]
    pub null_percentage: DeviationBands,

    /// Percent of distinct values in a column.
    #[serde(default = "default_unique_percentage")]
    pub unique_percentage: ScoreBands,
}

fn default_schema_health() -> ScoreBands {
    ScoreBands { healthy_min: 90.0, warning_min: 70.0 }
}

fn default_sla_compliance() -> ScoreBands {
    ScoreBands { healthy_min: 95.0, warning_min: 85.0 }
}

fn default_volume_deviation() -> DeviationBands {
    DeviationBands { healthy_max: 2.0, warning_max: 5.0 }
}

fn default_null_percentage() -> DeviationBands {
    DeviationBands { healthy_max: 0.0, warning_max: 5.0 }
}

fn default_unique_percentage() -> ScoreBands {
    ScoreBands { healthy_min: 95.0, warning_min: 80.0 }
}

impl Default for QualityPolicy {
    fn default() -> Self {
        QualityPolicy {
            schema_health: default_schema_health(),
            sla_compliance: default_sla_compliance(),
            volume_deviation: default_volume_deviation(),
            null_percentage: default_null_percentage(),
            unique_percentage: default_unique_percentage(),
        }
    }
}

impl QualityPolicy {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: QualityPolicy = serde_json::from_str(json)?;
        log_debug!("POLICY", "loaded quality policy: {:?}", policy);
        Ok(policy)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
