//! FILENAME: core/quality-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("Alert not found: {0}")]
    AlertNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QualityError>;
