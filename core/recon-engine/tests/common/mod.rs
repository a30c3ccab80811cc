//! FILENAME: tests/common/mod.rs
//! Fixtures for recon-engine integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use recon_engine::{FilterState, InventoryRecord};

/// Snapshot date used by the sample inventory.
pub fn snapshot_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()
}

/// Sample inventory: 3 regions x 2 inventory types x 3 stores.
pub struct InventoryFixture;

impl InventoryFixture {
    /// (region, inventory_type, store, raw, curated, integrated)
    pub fn rows() -> Vec<(&'static str, &'static str, &'static str, u64, u64, u64)> {
        vec![
            ("North America", "Electronics", "Store A", 1500, 1485, 1480),
            ("North America", "Electronics", "Store B", 2200, 2180, 2175),
            ("North America", "Electronics", "Store C", 1800, 1795, 1790),
            ("North America", "Clothing", "Store A", 3200, 3180, 3175),
            ("North America", "Clothing", "Store B", 2800, 2790, 2785),
            ("North America", "Clothing", "Store C", 2400, 2385, 2380),
            ("Europe", "Electronics", "Store D", 1900, 1885, 1880),
            ("Europe", "Electronics", "Store E", 2100, 2085, 2080),
            ("Europe", "Electronics", "Store F", 1700, 1690, 1685),
            ("Europe", "Clothing", "Store D", 2900, 2885, 2880),
            ("Europe", "Clothing", "Store E", 3100, 3085, 3080),
            ("Europe", "Clothing", "Store F", 2600, 2590, 2585),
            ("Asia Pacific", "Electronics", "Store G", 2500, 2480, 2475),
            ("Asia Pacific", "Electronics", "Store H", 2800, 2785, 2780),
            ("Asia Pacific", "Electronics", "Store I", 2200, 2190, 2185),
            ("Asia Pacific", "Clothing", "Store G", 3500, 3485, 3480),
            ("Asia Pacific", "Clothing", "Store H", 3800, 3785, 3780),
            ("Asia Pacific", "Clothing", "Store I", 3200, 3190, 3185),
        ]
    }

    pub fn records() -> Vec<InventoryRecord> {
        Self::rows()
            .into_iter()
            .enumerate()
            .map(|(i, (region, inventory_type, store, raw, curated, integrated))| {
                InventoryRecord::new(
                    (i + 1).to_string(),
                    region,
                    inventory_type,
                    store,
                    raw,
                    curated,
                    integrated,
                    snapshot_date(),
                )
            })
            .collect()
    }

    /// The same inventory repeated over `days` consecutive dates ending at the snapshot.
    pub fn history(days: i64) -> Vec<InventoryRecord> {
        let base = Self::records();
        let mut out = Vec::new();
        for offset in (0..days).rev() {
            let date = snapshot_date() - chrono::Duration::days(offset);
            for record in &base {
                let mut r = record.clone();
                r.id = format!("{}_{}", record.id, offset);
                r.date = date;
                out.push(r);
            }
        }
        out
    }
}

/// Every state reachable from the initial state by drilling down along the fixture.
pub fn reachable_states(records: &[InventoryRecord]) -> Vec<FilterState> {
    let mut states = vec![FilterState::new()];
    let mut frontier = vec![FilterState::new()];

    while let Some(state) = frontier.pop() {
        if !state.can_drill_down() {
            continue;
        }
        let view = recon_engine::calculate_view(records, &state, &Default::default());
        for row in view.rows {
            let next = state.drill_down(&row.key).unwrap();
            states.push(next.clone());
            frontier.push(next);
        }
    }

    states
}
