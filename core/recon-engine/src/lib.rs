//! FILENAME: core/recon-engine/src/lib.rs
//! Inventory reconciliation engine.
//!
//! Compares inventory counts across the Raw, Curated and Integrated pipeline
//! layers. Records are filtered by the current drill state, grouped by a
//! composite key and reduced into per-group totals and discrepancy scores.
//!
//! Layers:
//! - `definition`: Input records, drill levels and the filter state machine
//! - `key`: Structured group keys and composite key parsing
//! - `engine`: Filtering, grouping and series calculation (HOW we calculate)
//! - `view`: Renderable output for the presentation layer (WHAT we display)
//! - `policy`: Configurable display thresholds
//! - `logging`: Unified sequenced logging shared by the workspace

pub mod logging;
pub mod error;
pub mod definition;
pub mod key;
pub mod policy;
pub mod view;
pub mod engine;

pub use error::{ReconError, Result};
pub use definition::*;
pub use key::{GroupKey, KEY_SEPARATOR};
pub use policy::{DashboardPolicy, DiscrepancyPolicy, DiscrepancySeverity};
pub use view::*;
pub use engine::{
    calculate_view, comparison_series, drill_down, drill_up, filter_options,
    filter_records, format_percentage, group_by, records_from_json, reset,
    trend_series, trend_title, variance_percentage,
};
