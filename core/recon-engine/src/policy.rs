//! FILENAME: core/recon-engine/src/policy.rs
//! Display policy for the reconciliation views.
//!
//! Thresholds here classify values for presentation only. They are
//! configuration, loaded from JSON, and never change what the engine computes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::log_debug;

/// Default discrepancy at which a group is considered severe.
pub const DEFAULT_SEVERE_THRESHOLD: u64 = 50;

/// Default number of dated points kept in a trend series.
pub const DEFAULT_TREND_WINDOW_DAYS: usize = 14;

/// Default maximum chart label length before truncation.
pub const DEFAULT_CHART_LABEL_MAX_CHARS: usize = 20;

// ============================================================================
// DISCREPANCY SEVERITY
// ============================================================================

/// Severity band of a group's discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancySeverity {
    /// Layers agree exactly.
    Clean,
    Minor,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyPolicy {
    /// Discrepancies at or above this value are severe; below it (and non-zero) minor.
    #[serde(default = "default_severe_threshold")]
    pub severe_threshold: u64,
}

fn default_severe_threshold() -> u64 {
    DEFAULT_SEVERE_THRESHOLD
}

impl Default for DiscrepancyPolicy {
    fn default() -> Self {
        DiscrepancyPolicy {
            severe_threshold: DEFAULT_SEVERE_THRESHOLD,
        }
    }
}

impl DiscrepancyPolicy {
    pub fn classify(&self, discrepancy: u64) -> DiscrepancySeverity {
        if discrepancy == 0 {
            DiscrepancySeverity::Clean
        } else if discrepancy < self.severe_threshold {
            DiscrepancySeverity::Minor
        } else {
            DiscrepancySeverity::Severe
        }
    }
}

// ============================================================================
// DASHBOARD POLICY
// ============================================================================

/// All presentation knobs of the reconciliation dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardPolicy {
    #[serde(default)]
    pub discrepancy: DiscrepancyPolicy,

    /// How many of the most recent dates a trend series keeps.
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: usize,

    /// Chart labels longer than this are truncated with "...".
    #[serde(default = "default_chart_label_max_chars")]
    pub chart_label_max_chars: usize,
}

fn default_trend_window_days() -> usize {
    DEFAULT_TREND_WINDOW_DAYS
}

fn default_chart_label_max_chars() -> usize {
    DEFAULT_CHART_LABEL_MAX_CHARS
}

impl Default for DashboardPolicy {
    fn default() -> Self {
        DashboardPolicy {
            discrepancy: DiscrepancyPolicy::default(),
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
            chart_label_max_chars: DEFAULT_CHART_LABEL_MAX_CHARS,
        }
    }
}

impl DashboardPolicy {
    /// Parses a policy document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: DashboardPolicy = serde_json::from_str(json)?;
        log_debug!("POLICY", "loaded dashboard policy: {:?}", policy);
        Ok(policy)
    }

    /// Reads a policy document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
