//! Email Service Module
//!
//! Outbound email for verification codes and welcome messages.
//!
//! ## Features
//!
//! - **EmailService trait**: common interface for all providers
//! - **Mock implementation**: logs messages for development; records them when asked
//! - **Resend support**: production delivery through the Resend HTTP API
//! - **Templates**: HTML and plain-text bodies for each message kind
//! - **Adapter**: bridges a provider to the core `EmailServiceTrait`

use std::sync::Arc;

use wn_core::services::EmailServiceTrait;
use wn_shared::config::{EmailConfig, EmailProvider, Environment};

use crate::InfrastructureError;

pub mod adapter;
pub mod email_service;
pub mod mock_email;
pub mod resend;
pub mod templates;

pub use adapter::EmailServiceAdapter;
pub use email_service::{EmailMessage, EmailService};
pub use mock_email::MockEmailService;
pub use resend::{ResendConfig, ResendEmailService};

#[cfg(test)]
mod tests;

/// Create the email service selected by configuration
///
/// Outside production a Resend configuration that cannot be initialized (for
/// example a missing API key) falls back to the mock service so the process
/// still starts. In production the error is returned instead.
pub fn create_email_service(
    config: &EmailConfig,
    environment: Environment,
) -> Result<Arc<dyn EmailServiceTrait>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            if environment.is_production() {
                tracing::warn!(
                    provider = "mock",
                    "Mock email provider in production; no email is delivered"
                );
            }
            Ok(Arc::new(EmailServiceAdapter::new(MockEmailService::new())))
        }
        EmailProvider::Resend => match ResendEmailService::new(ResendConfig::from(config)) {
            Ok(service) => {
                tracing::info!(provider = "resend", "Email service initialized");
                Ok(Arc::new(EmailServiceAdapter::new(service)))
            }
            Err(e) if environment.is_production() => {
                tracing::error!(error = %e, "Failed to initialize Resend email service");
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Resend email service");
                tracing::warn!("Falling back to mock email service");
                Ok(Arc::new(EmailServiceAdapter::new(MockEmailService::new())))
            }
        },
    }
}
