//! FILENAME: core/recon-engine/src/definition.rs
//! Reconciliation Definition - Input records and drill state.
//!
//! This module contains the types that DESCRIBE what the dashboard is looking at:
//! - The inventory records compared across pipeline layers
//! - The drill level hierarchy (region -> inventory type -> store)
//! - The filter state and its pure transition functions
//!
//! Every transition returns a new `FilterState`; nothing is mutated in place.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ReconError, Result};
use crate::key::GroupKey;
use crate::log_debug;

// ============================================================================
// RECORDS
// ============================================================================

/// One inventory entity observed in all three pipeline layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Unique identifier of the record.
    pub id: String,

    pub region: String,
    pub inventory_type: String,
    pub store: String,

    /// Count as loaded into the Raw layer.
    pub raw_layer: u64,

    /// Count after curation.
    pub curated_layer: u64,

    /// Count in the Integrated layer.
    pub integrated_layer: u64,

    /// Business date of the snapshot.
    pub date: NaiveDate,
}

impl InventoryRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        region: impl Into<String>,
        inventory_type: impl Into<String>,
        store: impl Into<String>,
        raw_layer: u64,
        curated_layer: u64,
        integrated_layer: u64,
        date: NaiveDate,
    ) -> Self {
        InventoryRecord {
            id: id.into(),
            region: region.into(),
            inventory_type: inventory_type.into(),
            store: store.into(),
            raw_layer,
            curated_layer,
            integrated_layer,
            date,
        }
    }

    /// `|raw - curated| + |curated - integrated|` for this record.
    pub fn discrepancy(&self) -> u64 {
        self.raw_layer.abs_diff(self.curated_layer)
            + self.curated_layer.abs_diff(self.integrated_layer)
    }
}

// ============================================================================
// DRILL LEVELS
// ============================================================================

/// Granularity of the current grouping key.
/// The derived ordering is the refinement order: Region < InventoryType < Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrillLevel {
    Region,
    InventoryType,
    Store,
}

impl Default for DrillLevel {
    fn default() -> Self {
        DrillLevel::Region
    }
}

impl DrillLevel {
    pub const ALL: [DrillLevel; 3] = [DrillLevel::Region, DrillLevel::InventoryType, DrillLevel::Store];

    /// Number of key segments at this level.
    pub fn depth(self) -> usize {
        match self {
            DrillLevel::Region => 1,
            DrillLevel::InventoryType => 2,
            DrillLevel::Store => 3,
        }
    }

    /// The next finer level, or None at the terminal level.
    pub fn next(self) -> Option<DrillLevel> {
        match self {
            DrillLevel::Region => Some(DrillLevel::InventoryType),
            DrillLevel::InventoryType => Some(DrillLevel::Store),
            DrillLevel::Store => None,
        }
    }

    /// The next coarser level, or None at the initial level.
    pub fn previous(self) -> Option<DrillLevel> {
        match self {
            DrillLevel::Region => None,
            DrillLevel::InventoryType => Some(DrillLevel::Region),
            DrillLevel::Store => Some(DrillLevel::InventoryType),
        }
    }

    /// Header of the key column in the reconciliation table.
    pub fn column_header(self) -> &'static str {
        match self {
            DrillLevel::Region => "Region",
            DrillLevel::InventoryType => "Region - Inventory Type",
            DrillLevel::Store => "Region - Inventory Type - Store",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrillLevel::Region => "region",
            DrillLevel::InventoryType => "inventoryType",
            DrillLevel::Store => "store",
        }
    }
}

impl fmt::Display for DrillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrillLevel {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self> {
        DrillLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ReconError::UnknownDrillLevel(s.to_string()))
    }
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// A categorical record dimension that can be selected in the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Region,
    InventoryType,
    Store,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Region, Dimension::InventoryType, Dimension::Store];

    pub fn value_of(self, record: &InventoryRecord) -> &str {
        match self {
            Dimension::Region => &record.region,
            Dimension::InventoryType => &record.inventory_type,
            Dimension::Store => &record.store,
        }
    }

    /// Lowest drill level at which a selection on this dimension narrows the records.
    /// A region selection is inert while regions are still being listed side by side,
    /// and a store selection only matters once stores are listed.
    pub fn activation_level(self) -> DrillLevel {
        match self {
            Dimension::Region => DrillLevel::InventoryType,
            Dimension::InventoryType => DrillLevel::Region,
            Dimension::Store => DrillLevel::Store,
        }
    }
}

// ============================================================================
// FILTER STATE
// ============================================================================

/// Current selections and drill level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, deserialize_with = "deserialize_selection")]
    pub selected_region: Option<String>,

    #[serde(default, deserialize_with = "deserialize_selection")]
    pub selected_inventory_type: Option<String>,

    #[serde(default, deserialize_with = "deserialize_selection")]
    pub selected_store: Option<String>,

    #[serde(default)]
    pub current_level: DrillLevel,
}

/// Empty selections are the same as no selection.
fn normalize(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn deserialize_selection<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(normalize))
}

impl FilterState {
    /// Initial state: no selections, region level.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// The non-empty selection on `dimension`, if any.
    pub fn selection(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::Region => self.selected_region.as_deref(),
            Dimension::InventoryType => self.selected_inventory_type.as_deref(),
            Dimension::Store => self.selected_store.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Selections that currently narrow the record set.
    pub fn active_filters(&self) -> impl Iterator<Item = (Dimension, &str)> + '_ {
        Dimension::ALL.into_iter().filter_map(move |dimension| {
            if self.current_level < dimension.activation_level() {
                return None;
            }
            self.selection(dimension).map(|value| (dimension, value))
        })
    }

    pub fn matches(&self, record: &InventoryRecord) -> bool {
        self.active_filters()
            .all(|(dimension, value)| dimension.value_of(record) == value)
    }

    pub fn with_region(&self, region: impl Into<String>) -> Self {
        FilterState {
            selected_region: normalize(region),
            ..self.clone()
        }
    }

    pub fn with_inventory_type(&self, inventory_type: impl Into<String>) -> Self {
        FilterState {
            selected_inventory_type: normalize(inventory_type),
            ..self.clone()
        }
    }

    pub fn with_store(&self, store: impl Into<String>) -> Self {
        FilterState {
            selected_store: normalize(store),
            ..self.clone()
        }
    }

    /// Clears the selection on one dimension; the drill level is untouched.
    pub fn clear(&self, dimension: Dimension) -> Self {
        let mut next = self.clone();
        match dimension {
            Dimension::Region => next.selected_region = None,
            Dimension::InventoryType => next.selected_inventory_type = None,
            Dimension::Store => next.selected_store = None,
        }
        next
    }

    pub fn can_drill_down(&self) -> bool {
        self.current_level.next().is_some()
    }

    pub fn can_drill_up(&self) -> bool {
        self.current_level.previous().is_some()
    }

    /// Drills into the group identified by a composite key such as `"Europe - Clothing"`.
    ///
    /// The key must have exactly as many segments as the current level. Drilling
    /// from the store level returns the state unchanged.
    ///
    /// Dimension values that themselves contain `" - "` cannot be recovered from
    /// the display string; drill from a row with `drill_into(&row.group_key)`.
    pub fn drill_down(&self, selected_key: &str) -> Result<Self> {
        if !self.can_drill_down() {
            return Ok(self.clone());
        }
        let key = GroupKey::parse(selected_key, self.current_level)?;
        self.drill_into(&key)
    }

    /// Drills into a structured key. The key's level must equal the current level.
    pub fn drill_into(&self, key: &GroupKey) -> Result<Self> {
        let level = self.current_level;
        if level == DrillLevel::Store {
            return Ok(self.clone());
        }
        if key.level() != level {
            return Err(ReconError::InvalidDrillKey {
                key: key.to_string(),
                level,
                expected: level.depth(),
                found: key.level().depth(),
            });
        }

        let mut next = self.clone();
        match level {
            DrillLevel::Region => {
                next.selected_region = Some(key.region.clone());
                next.current_level = DrillLevel::InventoryType;
            }
            DrillLevel::InventoryType => {
                if let Some(selected) = self.selection(Dimension::Region) {
                    if selected != key.region {
                        log_debug!("DRILL", "key region '{}' differs from selected region '{}'", key.region, selected);
                    }
                }
                next.selected_inventory_type = key.inventory_type.clone();
                next.current_level = DrillLevel::Store;
            }
            DrillLevel::Store => {}
        }

        log_debug!("DRILL", "drill_down {} -> {} via '{}'", level, next.current_level, key);
        Ok(next)
    }

    /// Moves one level up, clearing the selection that produced the current level.
    pub fn drill_up(&self) -> Self {
        let mut next = self.clone();
        match self.current_level {
            DrillLevel::Store => {
                next.selected_inventory_type = None;
                next.current_level = DrillLevel::InventoryType;
            }
            DrillLevel::InventoryType => {
                next.selected_region = None;
                next.current_level = DrillLevel::Region;
            }
            DrillLevel::Region => return next,
        }
        log_debug!("DRILL", "drill_up {} -> {}", self.current_level, next.current_level);
        next
    }

    /// Clears every selection and returns to the region level.
    pub fn reset(&self) -> Self {
        FilterState::default()
    }

    /// Active selections joined with `" > "`, e.g. `"Europe > Clothing"`.
    pub fn breadcrumb(&self) -> String {
        Dimension::ALL
            .into_iter()
            .filter_map(|dimension| self.selection(dimension))
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
