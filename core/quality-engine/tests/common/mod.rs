//! FILENAME: tests/common/mod.rs
//! Fixtures for quality-engine integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use quality_engine::{
    AlertSeverity, AlertType, DailyCount, DistributionMetric, ForeignKey, FreshnessMetric,
    FreshnessStatus, HourlyCount, PartitionConsistency, ProfileValue, SchemaAlert, SchemaMetric,
    TableStatus, VolumeMetric,
};

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 19, hour, minute, 0).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn fk(column: &str, table: &str) -> ForeignKey {
    ForeignKey {
        column: column.to_string(),
        referenced_table: table.to_string(),
        referenced_column: "id".to_string(),
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn schema_metric(
    id: &str,
    table_name: &str,
    column_count: u32,
    constraints: &[&str],
    foreign_keys: Vec<ForeignKey>,
    status: TableStatus,
) -> SchemaMetric {
    SchemaMetric {
        id: id.to_string(),
        table_name: table_name.to_string(),
        database: "production".to_string(),
        schema: "public".to_string(),
        column_count,
        column_names: Vec::new(),
        column_order: 1,
        data_types: Default::default(),
        partition_keys: Vec::new(),
        constraints: strings(constraints),
        schema_version: "v1.0.0".to_string(),
        primary_keys: strings(&["id"]),
        unique_keys: Vec::new(),
        foreign_keys,
        last_updated: at(10, 30),
        status,
        issues: Vec::new(),
    }
}

pub fn schema_metrics() -> Vec<SchemaMetric> {
    vec![
        schema_metric(
            "1",
            "user_profiles",
            8,
            &["NOT NULL id", "UNIQUE email", "CHECK status IN (active, inactive, pending)"],
            vec![fk("region_id", "regions")],
            TableStatus::Healthy,
        ),
        schema_metric(
            "2",
            "inventory_items",
            12,
            &["NOT NULL item_id", "NOT NULL sku", "CHECK quantity >= 0", "CHECK price > 0"],
            vec![fk("supplier_id", "suppliers")],
            TableStatus::Warning,
        ),
        schema_metric(
            "3",
            "order_transactions",
            10,
            &["NOT NULL transaction_id", "NOT NULL order_id", "CHECK amount > 0"],
            vec![fk("order_id", "orders"), fk("customer_id", "customers")],
            TableStatus::Critical,
        ),
    ]
}

pub fn alert(id: &str, table_name: &str, alert_type: AlertType, severity: AlertSeverity, resolved: bool) -> SchemaAlert {
    SchemaAlert {
        id: id.to_string(),
        table_name: table_name.to_string(),
        alert_type,
        severity,
        message: format!("{} on {}", alert_type.display_name(), table_name),
        timestamp: at(9, 0),
        resolved,
    }
}

pub fn schema_alerts() -> Vec<SchemaAlert> {
    vec![
        alert("1", "inventory_items", AlertType::SchemaDrift, AlertSeverity::Medium, false),
        alert("2", "order_transactions", AlertType::KeyIssue, AlertSeverity::Critical, false),
        alert("3", "order_transactions", AlertType::TypeMismatch, AlertSeverity::High, false),
        alert("4", "user_profiles", AlertType::ColumnMissing, AlertSeverity::Low, true),
    ]
}

// ============================================================================
// FRESHNESS
// ============================================================================

pub fn freshness_metric(
    id: &str,
    table_name: &str,
    data_age: f64,
    status: FreshnessStatus,
    sla_compliance: f64,
    records_affected: u64,
) -> FreshnessMetric {
    FreshnessMetric {
        id: id.to_string(),
        table_name: table_name.to_string(),
        database: "production".to_string(),
        schema: "public".to_string(),
        data_age,
        expected_arrival_time: at(6, 0),
        actual_arrival_time: at(6, 30),
        time_since_last_load: data_age,
        freshness_status: status,
        sla_threshold: 4.0,
        warning_threshold: 3.0,
        critical_threshold: 6.0,
        update_frequency: 6,
        actual_updates: 6,
        sla_compliance,
        records_affected,
        last_updated: at(6, 30),
    }
}

pub fn freshness_metrics() -> Vec<FreshnessMetric> {
    vec![
        freshness_metric("1", "user_profiles", 2.5, FreshnessStatus::WithinSla, 95.2, 0),
        freshness_metric("2", "inventory_items", 4.2, FreshnessStatus::Warning, 87.3, 1250),
        freshness_metric("3", "order_transactions", 7.8, FreshnessStatus::Critical, 72.1, 5670),
    ]
}

// ============================================================================
// DISTRIBUTION
// ============================================================================

pub fn distribution_metric(
    id: &str,
    table_name: &str,
    column_name: &str,
    null_percentage: f64,
    unique_percentage: f64,
) -> DistributionMetric {
    DistributionMetric {
        id: id.to_string(),
        table_name: table_name.to_string(),
        column_name: column_name.to_string(),
        data_type: "INTEGER".to_string(),
        mean: Some(34.2),
        median: Some(32.0),
        mode: Some(ProfileValue::Number(28.0)),
        standard_deviation: Some(12.5),
        min_value: Some(ProfileValue::Number(18.0)),
        max_value: Some(ProfileValue::Number(85.0)),
        null_count: 0,
        null_percentage,
        unique_count: 0,
        unique_percentage,
        total_rows: 2145,
        last_profiled: at(8, 0),
    }
}

pub fn distribution_metrics() -> Vec<DistributionMetric> {
    vec![
        distribution_metric("1", "user_profiles", "age", 2.1, 85.2),
        distribution_metric("2", "inventory_items", "price", 0.8, 98.2),
        distribution_metric("3", "user_profiles", "email", 0.0, 100.0),
        distribution_metric("4", "order_transactions", "gateway_response", 18.0, 12.0),
    ]
}

// ============================================================================
// VOLUME
// ============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
pub fn volume_metric(
    id: &str,
    table_name: &str,
    total_row_count: u64,
    expected_row_count: u64,
    volume_deviation: f64,
    null_row_count: u64,
    duplicate_row_count: u64,
    table_size_gb: f64,
    partition_consistency: PartitionConsistency,
    trend: &[(u32, u64)],
    hourly: &[(&str, u64)],
) -> VolumeMetric {
    VolumeMetric {
        id: id.to_string(),
        table_name: table_name.to_string(),
        database: "production".to_string(),
        schema: "public".to_string(),
        total_row_count,
        expected_row_count,
        volume_deviation,
        null_row_count,
        duplicate_row_count,
        table_size_gb,
        partition_consistency,
        hourly_arrival_counts: hourly
            .iter()
            .map(|(hour, count)| HourlyCount { hour: hour.to_string(), count: *count })
            .collect(),
        volume_trend: trend
            .iter()
            .map(|(d, count)| DailyCount { date: day(*d), count: *count })
            .collect(),
        last_updated: at(10, 30),
    }
}

pub fn volume_metrics() -> Vec<VolumeMetric> {
    vec![
        volume_metric(
            "1", "user_profiles", 2145, 2200, -2.5, 3, 0, 0.45,
            PartitionConsistency::Consistent,
            &[(17, 2156), (18, 2134), (19, 2145)],
            &[("00:00", 45), ("01:00", 32)],
        ),
        volume_metric(
            "2", "inventory_items", 1482, 1500, -1.2, 8, 5, 2.1,
            PartitionConsistency::Inconsistent,
            &[(17, 1470), (18, 1478)],
            &[("00:00", 12), ("01:00", 8)],
        ),
        volume_metric(
            "3", "order_transactions", 8945, 9200, -2.8, 15, 23, 5.7,
            PartitionConsistency::Consistent,
            &[(17, 8800), (18, 8900), (19, 8945)],
            &[("00:00", 234), ("01:00", 189)],
        ),
    ]
}
