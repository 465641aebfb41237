//! Types for verification service inputs and results

use chrono::{DateTime, Utc};

use crate::domain::entities::subscriber::Subscriber;

/// Content of a verification code email handed to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    /// Normalized recipient address
    pub to: String,
    pub code: String,
    /// Used for the greeting when present
    pub first_name: Option<String>,
    pub expiration_minutes: i64,
}

/// Result of requesting a verification code
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// Normalized email the code was issued for
    pub email: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Whether the provider accepted the email
    pub email_dispatched: bool,
    /// Provider message id, when dispatch succeeded
    pub message_id: Option<String>,
}

/// Result of a successful confirmation
#[derive(Debug, Clone)]
pub struct ConfirmCodeResult {
    pub subscriber: Subscriber,
    /// True on first confirmation, false when an existing subscriber was updated
    pub created: bool,
}
