//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{ValidationError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Wrap a persistence failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
