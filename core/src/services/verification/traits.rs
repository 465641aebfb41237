//! Trait for email provider integration

use async_trait::async_trait;

use crate::domain::entities::subscriber::Subscriber;

use super::types::VerificationEmail;

/// Trait for email service integration
///
/// Both methods return the provider message id on success.
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send the templated verification code email
    async fn send_verification_code(&self, email: &VerificationEmail) -> Result<String, String>;
    /// Send the welcome email after a subscription is confirmed
    async fn send_welcome_email(&self, subscriber: &Subscriber) -> Result<String, String>;
}
