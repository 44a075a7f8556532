//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `MgError` as one variant
//! via `#[from]` where they need calendar or configuration checks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MgError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `mg-core`.
pub type MgResult<T> = Result<T, MgError>;
