//! Pile error types.

use thiserror::Error;

/// Pile errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PileError {
    /// The source pile holds less than the transfer asked for.
    #[error("Insufficient resource: available {available}, requested {requested}")]
    InsufficientResource { available: u64, requested: u64 },
}

/// Result type for pile operations
pub type PileResult<T> = Result<T, PileError>;
