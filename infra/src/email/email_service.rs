//! Provider-level email trait and message type

use async_trait::async_trait;

use crate::InfrastructureError;

/// A fully rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email delivery provider
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Deliver a message, returning the provider message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;
}
