//! Workspace error type.
//!
//! Sub-crates define their own error enums and convert `ReloError` into them
//! via `From` where a construction path needs to surface a core failure.

use thiserror::Error;

/// The top-level error type for `relo-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum ReloError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `relo-*` crates.
pub type ReloResult<T> = Result<T, ReloError>;
