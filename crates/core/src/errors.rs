//! Core error types for the snapshot engine.
//!
//! Ordinary data sparsity (missing prices, unpriceable trades, degenerate
//! return bases) never surfaces here; those cases resolve to neutral values
//! inside the engine. Errors are reserved for structurally impossible input.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the snapshot engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for caller-supplied input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required series '{0}' is empty")]
    EmptySeries(&'static str),
}
