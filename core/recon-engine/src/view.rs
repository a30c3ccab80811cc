//! FILENAME: core/recon-engine/src/view.rs
//! Reconciliation View - Renderable output for the presentation layer.
//!
//! Everything here is derived from (records, FilterState) and recomputed on
//! every state change. Renderers receive these values read-only.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::definition::{DrillLevel, InventoryRecord};
use crate::key::GroupKey;
use crate::policy::DiscrepancySeverity;

// ============================================================================
// AGGREGATED GROUPS
// ============================================================================

/// Records sharing one composite key, with per-layer totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedGroup {
    /// Composite display key, e.g. `"Europe - Clothing"`.
    pub key: String,

    /// Structured form of `key`.
    pub group_key: GroupKey,

    /// Source records mapped to this key, in input order.
    pub items: Vec<InventoryRecord>,

    pub raw_total: u64,
    pub curated_total: u64,
    pub integrated_total: u64,

    /// Sum over items of `|raw - curated| + |curated - integrated|`.
    pub discrepancy: u64,
}

impl AggregatedGroup {
    pub fn new(group_key: GroupKey) -> Self {
        AggregatedGroup {
            key: group_key.to_string(),
            group_key,
            items: Vec::new(),
            raw_total: 0,
            curated_total: 0,
            integrated_total: 0,
            discrepancy: 0,
        }
    }

    /// Adds a record to the group and folds it into the totals.
    pub fn push(&mut self, record: &InventoryRecord) {
        self.raw_total += record.raw_layer;
        self.curated_total += record.curated_layer;
        self.integrated_total += record.integrated_layer;
        self.discrepancy += record.discrepancy();
        self.items.push(record.clone());
    }

    pub fn record_count(&self) -> usize {
        self.items.len()
    }

    pub fn level(&self) -> DrillLevel {
        self.group_key.level()
    }
}

/// Groups keyed by composite key, iterated in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    groups: Vec<AggregatedGroup>,
    index: FxHashMap<String, usize>,
}

impl GroupMap {
    pub fn new() -> Self {
        GroupMap::default()
    }

    /// Folds a record into the group for `key`, creating it on first sight.
    pub fn insert(&mut self, key: GroupKey, record: &InventoryRecord) {
        let label = key.to_string();
        let slot = match self.index.get(&label) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.groups.push(AggregatedGroup::new(key));
                self.index.insert(label, slot);
                slot
            }
        };
        self.groups[slot].push(record);
    }

    pub fn get(&self, key: &str) -> Option<&AggregatedGroup> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AggregatedGroup> {
        self.groups.iter()
    }

    pub fn as_slice(&self) -> &[AggregatedGroup] {
        &self.groups
    }

    pub fn into_vec(self) -> Vec<AggregatedGroup> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a GroupMap {
    type Item = &'a AggregatedGroup;
    type IntoIter = std::slice::Iter<'a, AggregatedGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Serializes as a sequence of groups in first-occurrence order.
impl Serialize for GroupMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.groups)
    }
}

impl IntoIterator for GroupMap {
    type Item = AggregatedGroup;
    type IntoIter = std::vec::IntoIter<AggregatedGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

// ============================================================================
// TABLE VIEW
// ============================================================================

/// One row of the reconciliation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRow {
    pub key: String,
    pub group_key: GroupKey,

    pub raw_total: u64,
    pub curated_total: u64,
    pub integrated_total: u64,

    /// `|raw_total - curated_total|`
    pub raw_curated_diff: u64,
    /// Variance of curated against raw, in percent of raw.
    pub raw_curated_variance_pct: f64,

    /// `|curated_total - integrated_total|`
    pub curated_integrated_diff: u64,
    /// Variance of integrated against curated, in percent of curated.
    pub curated_integrated_variance_pct: f64,

    pub discrepancy: u64,
    pub severity: DiscrepancySeverity,

    pub record_count: usize,

    /// False at the store level.
    pub can_drill_down: bool,
}

/// The complete table model for one (records, FilterState) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationView {
    pub level: DrillLevel,
    pub column_header: String,
    pub breadcrumb: String,
    pub can_drill_up: bool,

    /// Records left after filtering.
    pub total_records: usize,

    pub rows: Vec<ReconciliationRow>,
}

impl ReconciliationView {
    /// True when the current selection matched no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// CHART SERIES
// ============================================================================

/// One bar group of the layer comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// Possibly truncated axis label.
    pub name: String,
    pub full_name: String,
    pub raw_layer: u64,
    pub curated_layer: u64,
    pub integrated_layer: u64,
    pub discrepancy: u64,
}

/// Layer totals for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub raw_layer: u64,
    pub curated_layer: u64,
    pub integrated_layer: u64,
    /// Records contributing to this date.
    pub count: usize,
}

impl TrendPoint {
    pub fn new(date: NaiveDate) -> Self {
        TrendPoint {
            date,
            raw_layer: 0,
            curated_layer: 0,
            integrated_layer: 0,
            count: 0,
        }
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// Distinct, sorted values offered by the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub inventory_types: Vec<String>,
    pub stores: Vec<String>,
}
