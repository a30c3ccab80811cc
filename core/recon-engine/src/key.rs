//! FILENAME: core/recon-engine/src/key.rs
//! Group keys.
//!
//! A group is identified both by a display string (`"Europe - Clothing"`) and
//! by the structured `GroupKey` it was built from. Drilling from a structured
//! key never has to re-parse the display string.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::{DrillLevel, InventoryRecord};
use crate::error::{ReconError, Result};

/// Separator between the components of a composite key.
pub const KEY_SEPARATOR: &str = " - ";

/// Structured composite key: `(region, inventory_type?, store?)`.
/// `store` is only set when `inventory_type` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub region: String,
    pub inventory_type: Option<String>,
    pub store: Option<String>,
}

impl GroupKey {
    /// Builds the key a record falls under at the given level.
    pub fn for_record(record: &InventoryRecord, level: DrillLevel) -> Self {
        let inventory_type = if level >= DrillLevel::InventoryType {
            Some(record.inventory_type.clone())
        } else {
            None
        };
        let store = if level >= DrillLevel::Store {
            Some(record.store.clone())
        } else {
            None
        };
        GroupKey {
            region: record.region.clone(),
            inventory_type,
            store,
        }
    }

    pub fn level(&self) -> DrillLevel {
        match (&self.inventory_type, &self.store) {
            (Some(_), Some(_)) => DrillLevel::Store,
            (Some(_), None) => DrillLevel::InventoryType,
            _ => DrillLevel::Region,
        }
    }

    pub fn segments(&self) -> SmallVec<[&str; 3]> {
        let mut segments: SmallVec<[&str; 3]> = SmallVec::new();
        segments.push(&self.region);
        if let Some(inventory_type) = self.inventory_type.as_deref() {
            segments.push(inventory_type);
            if let Some(store) = self.store.as_deref() {
                segments.push(store);
            }
        }
        segments
    }

    /// Parses a composite key produced at `level`.
    ///
    /// The key must split into exactly `level.depth()` non-empty segments.
    pub fn parse(key: &str, level: DrillLevel) -> Result<Self> {
        let parts: SmallVec<[&str; 3]> = key.split(KEY_SEPARATOR).collect();
        let expected = level.depth();

        if parts.len() != expected || parts.iter().any(|part| part.is_empty()) {
            return Err(ReconError::InvalidDrillKey {
                key: key.to_string(),
                level,
                expected,
                found: parts.len(),
            });
        }

        Ok(GroupKey {
            region: parts[0].to_string(),
            inventory_type: parts.get(1).map(|s| s.to_string()),
            store: parts.get(2).map(|s| s.to_string()),
        })
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join(KEY_SEPARATOR))
    }
}
