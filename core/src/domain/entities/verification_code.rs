//! Verification record entity for newsletter email confirmation.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of failed confirmations allowed per code
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Pending email verification, one per normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Normalized (trimmed, lower-cased) email, the identity key
    pub email: String,

    /// The 6-digit zero-padded verification code
    pub code: String,

    /// Number of failed confirmation attempts
    pub attempts: i32,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Issue a fresh record with a random code, expiring after `expiration_minutes`
    ///
    /// # Arguments
    ///
    /// * `email` - Normalized email address
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn issue(email: String, expiration_minutes: i64) -> Self {
        Self::issue_at(email, expiration_minutes, Utc::now())
    }

    /// Issue a fresh record relative to a given instant
    pub fn issue_at(email: String, expiration_minutes: i64, now: DateTime<Utc>) -> Self {
        Self {
            email,
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code, uniform over 000000-999999
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Normalize a caller-submitted code for comparison
    ///
    /// Surrounding whitespace is dropped and purely numeric input shorter than
    /// `CODE_LENGTH` is left-padded with zeros, so `"12345"` matches `"012345"`.
    pub fn normalize_submitted_code(code: &str) -> String {
        let trimmed = code.trim();
        if !trimmed.is_empty()
            && trimmed.len() < CODE_LENGTH
            && trimmed.chars().all(|c| c.is_ascii_digit())
        {
            format!("{:0>width$}", trimmed, width = CODE_LENGTH)
        } else {
            trimmed.to_string()
        }
    }

    /// Whether the code has expired at `now` (`now >= expires_at`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the failed-attempt budget is used up
    pub fn attempts_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compare a submitted code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        let submitted = Self::normalize_submitted_code(submitted);
        submitted.len() == self.code.len()
            && constant_time_eq(submitted.as_bytes(), self.code.as_bytes())
    }
}
