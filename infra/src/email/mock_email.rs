//! Mock email service for development and testing
//!
//! Messages are logged (recipient masked) instead of being delivered. Only a
//! recording mock keeps them in memory.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use wn_shared::utils::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

#[derive(Clone, Default)]
pub struct MockEmailService {
    outbox: Option<Arc<Mutex<Vec<EmailMessage>>>>,
    simulate_failure: bool,
}

impl MockEmailService {
    /// Mock that logs messages and keeps nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that also keeps every accepted message for inspection
    pub fn recording() -> Self {
        Self {
            outbox: Some(Arc::new(Mutex::new(Vec::new()))),
            simulate_failure: false,
        }
    }

    /// Mock that rejects every message
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::recording()
        }
    }

    /// Messages accepted so far, oldest first. Always empty unless recording.
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.outbox
            .as_ref()
            .and_then(|outbox| outbox.lock().ok().map(|outbox| outbox.clone()))
            .unwrap_or_default()
    }

    pub fn get_message_count(&self) -> usize {
        self.outbox
            .as_ref()
            .and_then(|outbox| outbox.lock().ok().map(|outbox| outbox.len()))
            .unwrap_or(0)
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if self.simulate_failure {
            return Err(InfrastructureError::Email(
                "Simulated email delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        tracing::info!(
            provider = "mock",
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            "Mock email accepted"
        );

        if let Some(outbox) = &self.outbox {
            outbox
                .lock()
                .map_err(|_| InfrastructureError::Email("Mock outbox lock poisoned".to_string()))?
                .push(message.clone());
        }

        Ok(message_id)
    }
}
