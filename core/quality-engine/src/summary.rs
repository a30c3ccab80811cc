//! FILENAME: core/quality-engine/src/summary.rs
//! Overview calculations for the observability page.
//!
//! Each overview reduces a metric collection into headline numbers plus a
//! health band. Empty collections produce zeros, never NaN.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use recon_engine::{log_enter, log_exit};

use crate::definition::{
    DistributionMetric, FreshnessMetric, FreshnessStatus, PartitionConsistency, ProfileValue,
    SchemaMetric, TableStatus, VolumeMetric,
};
use crate::policy::{HealthBand, QualityPolicy};

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssuesSummary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub healthy: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaOverview {
    /// Percent of healthy tables, rounded.
    pub health_score: u32,
    pub health_band: HealthBand,
    pub issues: SchemaIssuesSummary,
    pub total_columns: u64,
    pub total_constraints: usize,
    pub total_foreign_keys: usize,
}

/// Percent of tables whose status is healthy, rounded to the nearest integer.
pub fn schema_health_score(metrics: &[SchemaMetric]) -> u32 {
    if metrics.is_empty() {
        return 0;
    }
    let healthy = metrics
        .iter()
        .filter(|m| m.status == TableStatus::Healthy)
        .count();
    (healthy as f64 / metrics.len() as f64 * 100.0).round() as u32
}

pub fn schema_issues_summary(metrics: &[SchemaMetric]) -> SchemaIssuesSummary {
    let mut summary = SchemaIssuesSummary::default();
    for metric in metrics {
        summary.total += 1;
        match metric.status {
            TableStatus::Critical => summary.critical += 1,
            TableStatus::Warning => summary.warning += 1,
            TableStatus::Healthy => summary.healthy += 1,
        }
    }
    summary
}

pub fn schema_overview(metrics: &[SchemaMetric], policy: &QualityPolicy) -> SchemaOverview {
    log_enter!("QUALITY", "schema_overview", "tables={}", metrics.len());

    let health_score = schema_health_score(metrics);
    let overview = SchemaOverview {
        health_score,
        health_band: policy.schema_health.classify(health_score as f64),
        issues: schema_issues_summary(metrics),
        total_columns: metrics.iter().map(|m| m.column_count as u64).sum(),
        total_constraints: metrics.iter().map(|m| m.constraints.len()).sum(),
        total_foreign_keys: metrics.iter().map(|m| m.foreign_keys.len()).sum(),
    };

    log_exit!("QUALITY", "schema_overview", "score={}", overview.health_score);
    overview
}

// ============================================================================
// FRESHNESS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessOverview {
    pub total_tables: usize,
    pub avg_sla_compliance: f64,
    pub compliance_band: HealthBand,
    pub within_sla_tables: usize,
    pub warning_tables: usize,
    pub critical_tables: usize,
    pub total_records_affected: u64,
    /// Mean data age in hours.
    pub avg_data_age: f64,
}

pub fn freshness_overview(metrics: &[FreshnessMetric], policy: &QualityPolicy) -> FreshnessOverview {
    let count_status = |status: FreshnessStatus| {
        metrics.iter().filter(|m| m.freshness_status == status).count()
    };
    let avg_sla_compliance = mean(metrics.iter().map(|m| m.sla_compliance).sum(), metrics.len());

    FreshnessOverview {
        total_tables: metrics.len(),
        avg_sla_compliance,
        compliance_band: policy.sla_compliance.classify(avg_sla_compliance),
        within_sla_tables: count_status(FreshnessStatus::WithinSla),
        warning_tables: count_status(FreshnessStatus::Warning),
        critical_tables: count_status(FreshnessStatus::Critical),
        total_records_affected: metrics.iter().map(|m| m.records_affected).sum(),
        avg_data_age: mean(metrics.iter().map(|m| m.data_age).sum(), metrics.len()),
    }
}

// ============================================================================
// VOLUME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeOverview {
    pub total_rows: u64,
    pub total_expected_rows: u64,
    pub total_size_gb: f64,
    pub total_duplicates: u64,
    pub total_nulls: u64,
    /// Mean of the absolute per-table deviations, in percent.
    pub avg_volume_deviation: f64,
    pub deviation_band: HealthBand,
    pub consistent_partitions: usize,
    pub inconsistent_partitions: usize,
}

pub fn volume_overview(metrics: &[VolumeMetric], policy: &QualityPolicy) -> VolumeOverview {
    let avg_volume_deviation = mean(
        metrics.iter().map(|m| m.volume_deviation.abs()).sum(),
        metrics.len(),
    );
    let inconsistent_partitions = metrics
        .iter()
        .filter(|m| m.partition_consistency == PartitionConsistency::Inconsistent)
        .count();

    VolumeOverview {
        total_rows: metrics.iter().map(|m| m.total_row_count).sum(),
        total_expected_rows: metrics.iter().map(|m| m.expected_row_count).sum(),
        total_size_gb: metrics.iter().map(|m| m.table_size_gb).sum(),
        total_duplicates: metrics.iter().map(|m| m.duplicate_row_count).sum(),
        total_nulls: metrics.iter().map(|m| m.null_row_count).sum(),
        avg_volume_deviation,
        deviation_band: policy.volume_deviation.classify(avg_volume_deviation),
        consistent_partitions: metrics.len() - inconsistent_partitions,
        inconsistent_partitions,
    }
}

/// One x-axis position of a multi-table chart: a label and a count per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub label: String,
    /// (table name, count) in metric order.
    pub counts: Vec<(String, u64)>,
}

/// Combines the per-table series into rows labelled by the first table's points.
/// Tables are aligned by position; a table lacking a point contributes 0.
fn merge_series<F>(metrics: &[VolumeMetric], points: F) -> Vec<SeriesRow>
where
    F: Fn(&VolumeMetric) -> Vec<(String, u64)>,
{
    let Some(first) = metrics.first() else {
        return Vec::new();
    };
    let per_table: Vec<Vec<(String, u64)>> = metrics.iter().map(&points).collect();

    points(first)
        .into_iter()
        .enumerate()
        .map(|(index, (label, _))| SeriesRow {
            label,
            counts: metrics
                .iter()
                .zip(&per_table)
                .map(|(metric, series)| {
                    let count = series.get(index).map(|(_, c)| *c).unwrap_or(0);
                    (metric.table_name.clone(), count)
                })
                .collect(),
        })
        .collect()
}

/// Daily row counts of every table, keyed by the first table's dates.
pub fn volume_trend_rows(metrics: &[VolumeMetric]) -> Vec<SeriesRow> {
    merge_series(metrics, |m| {
        m.volume_trend
            .iter()
            .map(|p| (p.date.to_string(), p.count))
            .collect()
    })
}

/// Hourly arrival counts of every table, keyed by the first table's hours.
pub fn hourly_arrival_rows(metrics: &[VolumeMetric]) -> Vec<SeriesRow> {
    merge_series(metrics, |m| {
        m.hourly_arrival_counts
            .iter()
            .map(|p| (p.hour.clone(), p.count))
            .collect()
    })
}

// ============================================================================
// DISTRIBUTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub metric: DistributionMetric,
    pub null_band: HealthBand,
    pub unique_band: HealthBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDistribution {
    pub table_name: String,
    pub columns: Vec<ColumnProfile>,
}

/// Groups column profiles by table, tables in first-occurrence order.
pub fn distribution_by_table(
    metrics: &[DistributionMetric],
    policy: &QualityPolicy,
) -> Vec<TableDistribution> {
    let mut tables: Vec<TableDistribution> = Vec::new();
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();

    for metric in metrics {
        let slot = *index.entry(metric.table_name.as_str()).or_insert_with(|| {
            tables.push(TableDistribution {
                table_name: metric.table_name.clone(),
                columns: Vec::new(),
            });
            tables.len() - 1
        });
        tables[slot].columns.push(ColumnProfile {
            metric: metric.clone(),
            null_band: policy.null_percentage.classify(metric.null_percentage),
            unique_band: policy.unique_percentage.classify(metric.unique_percentage),
        });
    }

    tables
}

/// `"N/A"` for missing values, integers without decimals, other numbers
/// with two decimals.
pub fn format_profile_value(value: Option<&ProfileValue>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(ProfileValue::Number(n)) if n.fract() == 0.0 => format!("{}", *n as i64),
        Some(ProfileValue::Number(n)) => format!("{:.2}", n),
        Some(ProfileValue::Text(s)) => s.clone(),
    }
}
