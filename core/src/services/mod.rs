//! Business services containing domain logic and use cases.

pub mod newsletter;
pub mod verification;

// Re-export commonly used types
pub use newsletter::{NewsletterService, SubscriptionStatus};
pub use verification::{
    ConfirmCodeResult, EmailServiceTrait, RequestCodeResult, VerificationEmail,
    VerificationService, VerificationServiceConfig,
};

use wn_shared::utils::validation::{is_valid_email, normalize_email};

use crate::errors::ValidationError;

/// Normalize a caller-supplied email and reject implausible addresses
pub(crate) fn normalized_email(raw: &str) -> Result<String, ValidationError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}
