//! Verification code policy configuration

use serde::{Deserialize, Serialize};

/// Lifetime and retry policy for emailed verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Minutes a code stays valid after issuance
    pub code_expiration_minutes: i64,

    /// Failed confirmations allowed before the code is discarded
    pub max_attempts: i32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 5,
            max_attempts: 3,
        }
    }
}
