//! Resend Email Service Implementation
//!
//! Delivers messages through the Resend HTTP API (`POST {api_base}/emails`).
//!
//! ## Features
//!
//! - Bearer token authentication
//! - Automatic retry with exponential backoff on 429, 5xx and transport errors
//! - No retry on other client errors
//! - Recipient masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use wn_shared::config::EmailConfig;
use wn_shared::utils::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Resend provider settings
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    /// Sender, e.g. `WorkNow <noreply@worknow.co.il>`
    pub from_address: String,
    pub api_base_url: String,
    /// Maximum delivery attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl From<&EmailConfig> for ResendConfig {
    fn from(config: &EmailConfig) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            from_address: config.from_address.clone(),
            api_base_url: config.api_base_url.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendEmailRequest<'a> {
    pub from: &'a str,
    pub to: [&'a str; 1],
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Resend email service
pub struct ResendEmailService {
    client: Client,
    config: ResendConfig,
}

impl ResendEmailService {
    /// Create a new Resend email service
    ///
    /// Fails when the API key or sender address is missing.
    pub fn new(config: ResendConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Resend API key is not set".to_string(),
            ));
        }
        if config.from_address.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Sender address is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ResendConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/emails", self.config.api_base_url.trim_end_matches('/'))
    }

    pub(crate) fn request_body<'a>(&'a self, message: &'a EmailMessage) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: &self.config.from_address,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        }
    }

    fn is_retryable(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Send with retry logic
    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let body = self.request_body(message);
        let endpoint = self.endpoint();

        loop {
            attempts += 1;
            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                max_attempts,
                mask_email(&message.to)
            );

            let result = self
                .client
                .post(&endpoint)
                .bearer_auth(&self.config.api_key)
                .json(&body)
                .send()
                .await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    let parsed: SendEmailResponse = response.json().await?;
                    info!(
                        provider = "resend",
                        to = %mask_email(&message.to),
                        message_id = %parsed.id,
                        "Email sent successfully"
                    );
                    return Ok(parsed.id);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();
                    if !Self::is_retryable(status) {
                        error!(status = %status, "Resend rejected the email");
                        return Err(InfrastructureError::Email(format!(
                            "Resend rejected the request ({}): {}",
                            status, detail
                        )));
                    }
                    format!("status {}: {}", status, detail)
                }
                Err(e) => e.to_string(),
            };

            error!(
                "Failed to send email (attempt {}/{}): {}",
                attempts, max_attempts, failure
            );

            if attempts >= max_attempts {
                return Err(InfrastructureError::Email(format!(
                    "Failed to send email after {} attempts: {}",
                    max_attempts, failure
                )));
            }

            warn!("Retrying email delivery after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        info!(
            provider = "resend",
            to = %mask_email(&message.to),
            subject = %message.subject,
            "Sending email via Resend"
        );
        self.send_with_retry(message).await
    }
}
