//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! into one of their variants via `From` or keep the two separate.

use thiserror::Error;

/// Errors produced by `er-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `er-core`.
pub type CoreResult<T> = Result<T, CoreError>;
