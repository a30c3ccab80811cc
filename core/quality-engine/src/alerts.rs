//! FILENAME: core/quality-engine/src/alerts.rs
//! Schema alert handling.

use serde::{Deserialize, Serialize};

use recon_engine::{log_info, log_warn};

use crate::definition::{FreshnessMetric, FreshnessStatus, SchemaAlert};
use crate::error::{QualityError, Result};

/// Splits alerts into (active, resolved), each keeping input order.
pub fn partition_alerts(alerts: &[SchemaAlert]) -> (Vec<&SchemaAlert>, Vec<&SchemaAlert>) {
    alerts.iter().partition(|alert| !alert.resolved)
}

/// Returns a copy of `alerts` with the alert `alert_id` marked resolved.
/// Resolving an already resolved alert is allowed and changes nothing.
pub fn resolve_alert(alerts: &[SchemaAlert], alert_id: &str) -> Result<Vec<SchemaAlert>> {
    if !alerts.iter().any(|alert| alert.id == alert_id) {
        log_warn!("QUALITY", "resolve_alert: unknown alert '{}'", alert_id);
        return Err(QualityError::AlertNotFound(alert_id.to_string()));
    }

    log_info!("QUALITY", "resolving alert '{}'", alert_id);
    Ok(alerts
        .iter()
        .map(|alert| {
            if alert.id == alert_id {
                SchemaAlert {
                    resolved: true,
                    ..alert.clone()
                }
            } else {
                alert.clone()
            }
        })
        .collect())
}

/// Headline issue counts of the observability page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityStatus {
    pub active_alerts: usize,
    pub critical_freshness_issues: usize,
    pub total_issues: usize,
}

pub fn observability_status(alerts: &[SchemaAlert], freshness: &[FreshnessMetric]) -> ObservabilityStatus {
    let active_alerts = alerts.iter().filter(|alert| !alert.resolved).count();
    let critical_freshness_issues = freshness
        .iter()
        .filter(|m| m.freshness_status == FreshnessStatus::Critical)
        .count();

    ObservabilityStatus {
        active_alerts,
        critical_freshness_issues,
        total_issues: active_alerts + critical_freshness_issues,
    }
}
