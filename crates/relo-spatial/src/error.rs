//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `relo-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("obstacle parse error: {0}")]
    Parse(String),

    #[error("invalid obstacle on row {row}: {reason}")]
    InvalidObstacle { row: usize, reason: String },

    #[error("invalid obstacle: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
