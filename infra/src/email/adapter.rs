//! Adapter that implements the core EmailServiceTrait on top of any
//! infrastructure EmailService, rendering the templates on the way.

use async_trait::async_trait;
use wn_core::domain::entities::Subscriber;
use wn_core::services::{EmailServiceTrait, VerificationEmail};

use super::email_service::EmailService;
use super::templates;

pub struct EmailServiceAdapter<T: EmailService> {
    inner: T,
}

impl<T: EmailService> EmailServiceAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: EmailService> EmailServiceTrait for EmailServiceAdapter<T> {
    async fn send_verification_code(&self, email: &VerificationEmail) -> Result<String, String> {
        let message = templates::verification_email(email);
        self.inner
            .send_email(&message)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_welcome_email(&self, subscriber: &Subscriber) -> Result<String, String> {
        let message = templates::welcome_email(subscriber);
        self.inner
            .send_email(&message)
            .await
            .map_err(|e| e.to_string())
    }
}
