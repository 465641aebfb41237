//! Configuration for the verification service

use wn_shared::config::VerificationConfig;

use crate::domain::entities::verification_code::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of failed confirmations allowed per code
    pub max_attempts: i32,
    /// Whether to send a welcome email to newly created subscribers
    pub send_welcome_email: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            send_welcome_email: true,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            max_attempts: config.max_attempts,
            ..Self::default()
        }
    }
}
