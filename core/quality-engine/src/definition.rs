//! FILENAME: core/quality-engine/src/definition.rs
//! Observability records.
//!
//! Metric shapes as produced by the profiling jobs. Field names serialize in
//! snake_case; status enums use the lowercase wire names of the profilers.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Structural snapshot of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetric {
    pub id: String,
    pub table_name: String,
    pub database: String,
    pub schema: String,
    pub column_count: u32,
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub column_order: u32,
    /// Column name -> declared SQL type.
    #[serde(default)]
    pub data_types: BTreeMap<String, String>,
    #[serde(default)]
    pub partition_keys: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub schema_version: String,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub unique_keys: Vec<String>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    pub last_updated: DateTime<Utc>,
    pub status: TableStatus,
    #[serde(default)]
    pub issues: Vec<String>,
}

// ============================================================================
// ALERTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    SchemaDrift,
    ColumnMissing,
    TypeMismatch,
    ConstraintViolation,
    KeyIssue,
}

impl AlertType {
    pub fn display_name(self) -> &'static str {
        match self {
            AlertType::SchemaDrift => "Schema Drift",
            AlertType::ColumnMissing => "Column Missing",
            AlertType::TypeMismatch => "Type Mismatch",
            AlertType::ConstraintViolation => "Constraint Violation",
            AlertType::KeyIssue => "Key Issue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAlert {
    pub id: String,
    pub table_name: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

// ============================================================================
// FRESHNESS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessStatus {
    WithinSla,
    Warning,
    Critical,
}

/// Arrival timeliness of one table. Durations are in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessMetric {
    pub id: String,
    pub table_name: String,
    pub database: String,
    pub schema: String,
    pub data_age: f64,
    pub expected_arrival_time: DateTime<Utc>,
    pub actual_arrival_time: DateTime<Utc>,
    pub time_since_last_load: f64,
    pub freshness_status: FreshnessStatus,
    pub sla_threshold: f64,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    /// Expected loads per day.
    pub update_frequency: u32,
    /// Loads observed today.
    pub actual_updates: u32,
    /// Percent of loads within SLA.
    pub sla_compliance: f64,
    pub records_affected: u64,
    pub last_updated: DateTime<Utc>,
}

impl FreshnessMetric {
    /// Minutes between expected and actual arrival; negative when early.
    pub fn arrival_delay_minutes(&self) -> i64 {
        (self.actual_arrival_time - self.expected_arrival_time).num_minutes()
    }
}

// ============================================================================
// DISTRIBUTION
// ============================================================================

/// A profiled statistic that is numeric for numeric columns and textual otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionMetric {
    pub id: String,
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub mode: Option<ProfileValue>,
    #[serde(default)]
    pub standard_deviation: Option<f64>,
    #[serde(default)]
    pub min_value: Option<ProfileValue>,
    #[serde(default)]
    pub max_value: Option<ProfileValue>,
    pub null_count: u64,
    pub null_percentage: f64,
    pub unique_count: u64,
    pub unique_percentage: f64,
    pub total_rows: u64,
    pub last_profiled: DateTime<Utc>,
}

// ============================================================================
// VOLUME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionConsistency {
    Consistent,
    Inconsistent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCount {
    /// Hour label, e.g. "04:00".
    pub hour: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMetric {
    pub id: String,
    pub table_name: String,
    pub database: String,
    pub schema: String,
    pub total_row_count: u64,
    pub expected_row_count: u64,
    /// Signed deviation from the expected row count, in percent.
    pub volume_deviation: f64,
    pub null_row_count: u64,
    pub duplicate_row_count: u64,
    #[serde(rename = "tableSizeGB")]
    pub table_size_gb: f64,
    pub partition_consistency: PartitionConsistency,
    #[serde(default)]
    pub hourly_arrival_counts: Vec<HourlyCount>,
    #[serde(default)]
    pub volume_trend: Vec<DailyCount>,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&FreshnessStatus::WithinSla).unwrap(), "\"within_sla\"");
        assert_eq!(serde_json::to_string(&AlertType::KeyIssue).unwrap(), "\"key_issue\"");
        assert_eq!(serde_json::to_string(&TableStatus::Healthy).unwrap(), "\"healthy\"");
    }

    #[test]
    fn test_profile_value_untagged() {
        let n: ProfileValue = serde_json::from_str("49.99").unwrap();
        assert_eq!(n, ProfileValue::Number(49.99));
        let t: ProfileValue = serde_json::from_str("\"gmail.com\"").unwrap();
        assert_eq!(t, ProfileValue::Text("gmail.com".to_string()));
    }

    #[test]
    fn test_alert_display_names() {
        assert_eq!(AlertType::ConstraintViolation.display_name(), "Constraint Violation");
        assert!(AlertSeverity::Critical > AlertSeverity::High);
    }

    #[test]
    fn test_schema_metric_dashboard_shape() {
        let json = r#"{
            "id": "1", "tableName": "user_profiles", "database": "production", "schema": "public",
            "columnCount": 8, "columnNames": ["id", "region_id"], "columnOrder": 1,
            "dataTypes": { "id": "UUID" }, "partitionKeys": ["created_at"],
            "constraints": ["NOT NULL id"], "schemaVersion": "v2.1.0",
            "primaryKeys": ["id"], "uniqueKeys": ["email"],
            "foreignKeys": [{ "column": "region_id", "referencedTable": "regions", "referencedColumn": "id" }],
            "lastUpdated": "2024-06-19T10:30:00Z", "status": "healthy", "issues": []
        }"#;
        let metric: SchemaMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.table_name, "user_profiles");
        assert_eq!(metric.foreign_keys[0].referenced_table, "regions");
        assert_eq!(metric.data_types.get("id").map(String::as_str), Some("UUID"));
    }

    #[test]
    fn test_volume_metric_dashboard_shape() {
        let json = r#"{
            "id": "1", "tableName": "user_profiles", "database": "production", "schema": "public",
            "totalRowCount": 2145, "expectedRowCount": 2200, "volumeDeviation": -2.5,
            "nullRowCount": 3, "duplicateRowCount": 0, "tableSizeGB": 0.45,
            "partitionConsistency": "consistent",
            "hourlyArrivalCounts": [{ "hour": "00:00", "count": 45 }],
            "volumeTrend": [{ "date": "2024-06-17", "count": 2156 }],
            "lastUpdated": "2024-06-19T10:30:00Z"
        }"#;
        let metric: VolumeMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.table_size_gb, 0.45);
        assert_eq!(metric.volume_trend[0].count, 2156);

        let back = serde_json::to_string(&metric).unwrap();
        assert!(back.contains("\"tableSizeGB\":0.45"));
        assert!(back.contains("\"partitionConsistency\":\"consistent\""));
    }
}
