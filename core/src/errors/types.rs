//! Error types for input validation and the email verification workflow
//!
//! Messages here are the canonical English texts; the presentation layer maps
//! each variant to an HTTP status and error code.

use thiserror::Error;

/// Input validation errors
///
/// These are caller-fixable: the request can be corrected and resent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Failures of the code confirmation step
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// No pending code exists for the email
    #[error("No pending verification for this email")]
    NoPendingVerification,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Maximum verification attempts exceeded. Please request a new code")]
    AttemptsExceeded,

    /// Wrong code; the caller may retry while attempts remain
    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    CodeMismatch { remaining_attempts: i32 },
}
