//! FILENAME: core/recon-engine/src/error.rs

use thiserror::Error;

use crate::definition::DrillLevel;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Invalid drill key '{key}' at level {level}: expected {expected} segment(s), found {found}")]
    InvalidDrillKey {
        key: String,
        level: DrillLevel,
        expected: usize,
        found: usize,
    },

    #[error("Unknown drill level: {0}")]
    UnknownDrillLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReconError>;
