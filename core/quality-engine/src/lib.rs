//! FILENAME: core/quality-engine/src/lib.rs
//! Schema observability subsystem.
//!
//! Summarises table-level data-quality metrics: schema health, freshness
//! against SLAs, row volumes and column distributions. It depends on
//! `recon-engine` only for the shared logging facility.
//!
//! Layers:
//! - `definition`: Metric and alert records (what is being observed)
//! - `policy`: Configurable health bands
//! - `summary`: Overview calculations (HOW we summarise)
//! - `alerts`: Alert partitioning and resolution

pub mod error;
pub mod definition;
pub mod policy;
pub mod summary;
pub mod alerts;

pub use error::{QualityError, Result};
pub use definition::*;
pub use policy::{DeviationBands, HealthBand, QualityPolicy, ScoreBands};
pub use summary::*;
pub use alerts::{observability_status, partition_alerts, resolve_alert, ObservabilityStatus};
