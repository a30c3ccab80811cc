//! FILENAME: core/recon-engine/src/engine.rs
//! Aggregation Engine - Turns records and a filter state into renderable views.
//!
//! Pipeline:
//! 1. Filter records by the active selections of the FilterState
//! 2. Group the survivors by the composite key of the current drill level
//! 3. Reduce each group into per-layer totals and a discrepancy score
//! 4. Shape the groups into table rows or chart series
//!
//! All functions are pure; the caller owns the FilterState and replaces it
//! with the value returned by the drill transitions.

use std::collections::{BTreeMap, BTreeSet};

use crate::definition::{Dimension, DrillLevel, FilterState, InventoryRecord};
use crate::error::Result;
use crate::key::GroupKey;
use crate::policy::DashboardPolicy;
use crate::view::{
    AggregatedGroup, ComparisonPoint, FilterOptions, GroupMap, ReconciliationRow,
    ReconciliationView, TrendPoint,
};
use crate::{log_debug, log_enter, log_exit, log_warn};

// ============================================================================
// FILTERING & GROUPING
// ============================================================================

/// Returns the records matching every active selection, in input order.
pub fn filter_records<'a>(
    records: &'a [InventoryRecord],
    state: &FilterState,
) -> Vec<&'a InventoryRecord> {
    records.iter().filter(|record| state.matches(record)).collect()
}

/// Groups records by the composite key of `level`.
/// Groups appear in the order their key first occurs in `records`.
pub fn group_by<'a, I>(records: I, level: DrillLevel) -> GroupMap
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let mut groups = GroupMap::new();
    for record in records {
        groups.insert(GroupKey::for_record(record, level), record);
    }
    groups
}

// ============================================================================
// DRILL TRANSITIONS
// ============================================================================

/// See [`FilterState::drill_down`]. Prefer [`FilterState::drill_into`] with a
/// row's `group_key` when dimension values may contain the key separator.
pub fn drill_down(state: &FilterState, selected_key: &str) -> Result<FilterState> {
    state.drill_down(selected_key).map_err(|e| {
        log_warn!("DRILL", "rejected drill key '{}': {}", selected_key, e);
        e
    })
}

/// See [`FilterState::drill_up`].
pub fn drill_up(state: &FilterState) -> FilterState {
    state.drill_up()
}

/// See [`FilterState::reset`].
pub fn reset(state: &FilterState) -> FilterState {
    state.reset()
}

// ============================================================================
// METRICS
// ============================================================================

/// Absolute difference between two layer totals in percent of `base`.
/// A zero base reports 0 instead of NaN or infinity.
pub fn variance_percentage(base: u64, other: u64) -> f64 {
    if base == 0 {
        return 0.0;
    }
    base.abs_diff(other) as f64 / base as f64 * 100.0
}

/// Formats a percentage with two decimals, e.g. `"1.25%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let head: String = label.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

// ============================================================================
// VIEWS
// ============================================================================

fn build_row(group: &AggregatedGroup, policy: &DashboardPolicy) -> ReconciliationRow {
    ReconciliationRow {
        key: group.key.clone(),
        group_key: group.group_key.clone(),
        raw_total: group.raw_total,
        curated_total: group.curated_total,
        integrated_total: group.integrated_total,
        raw_curated_diff: group.raw_total.abs_diff(group.curated_total),
        raw_curated_variance_pct: variance_percentage(group.raw_total, group.curated_total),
        curated_integrated_diff: group.curated_total.abs_diff(group.integrated_total),
        curated_integrated_variance_pct: variance_percentage(
            group.curated_total,
            group.integrated_total,
        ),
        discrepancy: group.discrepancy,
        severity: policy.discrepancy.classify(group.discrepancy),
        record_count: group.record_count(),
        can_drill_down: group.level().next().is_some(),
    }
}

/// Calculates the reconciliation table for the current state.
/// This is the main entry point for the presentation layer.
pub fn calculate_view(
    records: &[InventoryRecord],
    state: &FilterState,
    policy: &DashboardPolicy,
) -> ReconciliationView {
    log_enter!("ENGINE", "calculate_view", "records={} level={}", records.len(), state.current_level);

    let filtered = filter_records(records, state);
    let total_records = filtered.len();
    let groups = group_by(filtered, state.current_level);
    let rows: Vec<ReconciliationRow> = groups.iter().map(|g| build_row(g, policy)).collect();

    if rows.is_empty() {
        log_debug!("ENGINE", "no records match '{}'", state.breadcrumb());
    }

    let view = ReconciliationView {
        level: state.current_level,
        column_header: state.current_level.column_header().to_string(),
        breadcrumb: state.breadcrumb(),
        can_drill_up: state.can_drill_up(),
        total_records,
        rows,
    };

    log_exit!("ENGINE", "calculate_view", "rows={} filtered={}", view.rows.len(), total_records);
    view
}

/// Builds the layer comparison chart series from grouped output.
pub fn comparison_series(groups: &[AggregatedGroup], policy: &DashboardPolicy) -> Vec<ComparisonPoint> {
    groups
        .iter()
        .map(|group| ComparisonPoint {
            name: truncate_label(&group.key, policy.chart_label_max_chars),
            full_name: group.key.clone(),
            raw_layer: group.raw_total,
            curated_layer: group.curated_total,
            integrated_layer: group.integrated_total,
            discrepancy: group.discrepancy,
        })
        .collect()
}

/// Sums the layers per date and keeps the most recent `window` dates,
/// oldest first.
pub fn trend_series<'a, I>(records: I, window: usize) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let mut by_date: BTreeMap<chrono::NaiveDate, TrendPoint> = BTreeMap::new();
    for record in records {
        let point = by_date
            .entry(record.date)
            .or_insert_with(|| TrendPoint::new(record.date));
        point.raw_layer += record.raw_layer;
        point.curated_layer += record.curated_layer;
        point.integrated_layer += record.integrated_layer;
        point.count += 1;
    }

    let skip = by_date.len().saturating_sub(window);
    by_date.into_values().skip(skip).collect()
}

/// Title of the trend chart for the current selections.
pub fn trend_title(state: &FilterState) -> String {
    let mut title = String::from("Historical Inventory Trends");
    match (state.selection(Dimension::Region), state.selection(Dimension::InventoryType)) {
        (Some(region), Some(inventory_type)) => {
            title.push_str(&format!(" - {} - {}", region, inventory_type));
        }
        (Some(region), None) => {
            title.push_str(&format!(" - {}", region));
        }
        _ => {}
    }
    title
}

/// Distinct values per dimension, sorted ascending.
pub fn filter_options(records: &[InventoryRecord]) -> FilterOptions {
    let mut regions = BTreeSet::new();
    let mut inventory_types = BTreeSet::new();
    let mut stores = BTreeSet::new();

    for record in records {
        regions.insert(record.region.as_str());
        inventory_types.insert(record.inventory_type.as_str());
        stores.insert(record.store.as_str());
    }

    FilterOptions {
        regions: regions.into_iter().map(String::from).collect(),
        inventory_types: inventory_types.into_iter().map(String::from).collect(),
        stores: stores.into_iter().map(String::from).collect(),
    }
}

/// Parses a JSON array of records (`id, region, inventoryType, store,
/// rawLayer, curatedLayer, integratedLayer, date`).
pub fn records_from_json(json: &str) -> Result<Vec<InventoryRecord>> {
    let records: Vec<InventoryRecord> = serde_json::from_str(json)?;
    log_debug!("ENGINE", "parsed {} records", records.len());
    Ok(records)
}
