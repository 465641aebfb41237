//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;
use wn_shared::utils::validation::mask_email;

use crate::domain::entities::subscriber::{Subscriber, SubscriberProfile};
use crate::domain::entities::verification_code::VerificationRecord;
use crate::errors::{DomainResult, ValidationError, VerificationError};
use crate::repositories::{SubscriberRepository, VerificationRepository};
use crate::services::normalized_email;

use super::config::VerificationServiceConfig;
use super::traits::EmailServiceTrait;
use super::types::{ConfirmCodeResult, RequestCodeResult, VerificationEmail};

/// Verification service for newsletter email confirmation
///
/// Generic over the email provider `E`, the pending-code store `V` and the
/// subscriber registry `S`. All three may be trait objects.
pub struct VerificationService<E: ?Sized, V: ?Sized, S: ?Sized> {
    /// Email service for sending codes and welcome messages
    email_service: Arc<E>,
    /// Store of pending verification records
    verifications: Arc<V>,
    /// Subscriber registry written on successful confirmation
    subscribers: Arc<S>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<E, V, S> VerificationService<E, V, S>
where
    E: EmailServiceTrait + ?Sized,
    V: VerificationRepository + ?Sized,
    S: SubscriberRepository + ?Sized,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `email_service` - Email provider implementation
    /// * `verifications` - Pending verification store
    /// * `subscribers` - Subscriber registry
    /// * `config` - Service configuration
    pub fn new(
        email_service: Arc<E>,
        verifications: Arc<V>,
        subscribers: Arc<S>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            email_service,
            verifications,
            subscribers,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a verification code for an email and send it
    ///
    /// This method:
    /// 1. Normalizes and validates the email
    /// 2. Generates a new 6-digit code
    /// 3. Stores it, replacing any pending code for the same email
    /// 4. Sends the code by email (best effort)
    ///
    /// # Arguments
    ///
    /// * `email` - Raw email address as submitted
    /// * `first_name` - Optional name used in the email greeting
    ///
    /// # Returns
    ///
    /// * `Ok(RequestCodeResult)` - The code was stored; dispatch outcome is reported inside
    /// * `Err(DomainError)` - Invalid email or storage failure
    pub async fn request_code(
        &self,
        email: &str,
        first_name: Option<&str>,
    ) -> DomainResult<RequestCodeResult> {
        let email = normalized_email(email)?;
        let masked = mask_email(&email);

        let record = VerificationRecord::issue(email.clone(), self.config.code_expiration_minutes);

        self.verifications.upsert(&record).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "verification_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        tracing::info!(
            email = %masked,
            expires_at = %record.expires_at,
            event = "verification_code_issued",
            "Issued verification code"
        );

        let message = VerificationEmail {
            to: email.clone(),
            code: record.code.clone(),
            first_name: first_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            expiration_minutes: self.config.code_expiration_minutes,
        };

        let message_id = match self.email_service.send_verification_code(&message).await {
            Ok(id) => {
                tracing::info!(
                    email = %masked,
                    message_id = %id,
                    event = "verification_email_sent",
                    "Verification email dispatched"
                );
                Some(id)
            }
            Err(e) => {
                tracing::warn!(
                    email = %masked,
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to dispatch verification email"
                );
                None
            }
        };

        Ok(RequestCodeResult {
            email,
            expires_at: record.expires_at,
            email_dispatched: message_id.is_some(),
            message_id,
        })
    }

    /// Confirm a submitted code and register the subscriber
    ///
    /// Checks run in a fixed order: expiry, then the attempt limit, then the
    /// code itself. Expired and exhausted records are deleted on the spot.
    ///
    /// # Arguments
    ///
    /// * `email` - Raw email address as submitted
    /// * `code` - Code the caller received
    /// * `profile` - Profile and preferences stored for the subscriber
    ///
    /// # Returns
    ///
    /// * `Ok(ConfirmCodeResult)` - The subscriber and whether it was newly created
    /// * `Err(DomainError)` - Validation, verification or storage failure
    pub async fn confirm_code(
        &self,
        email: &str,
        code: &str,
        profile: SubscriberProfile,
    ) -> DomainResult<ConfirmCodeResult> {
        let email = normalized_email(email)?;
        let masked = mask_email(&email);

        if code.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            }
            .into());
        }

        let record = match self.verifications.find_by_email(&email).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = %masked,
                    event = "verification_not_found",
                    "No pending verification for email"
                );
                return Err(VerificationError::NoPendingVerification.into());
            }
        };

        if record.is_expired_at(Utc::now()) {
            self.verifications.delete(&email).await?;
            tracing::warn!(
                email = %masked,
                event = "verification_code_expired",
                "Verification code expired"
            );
            return Err(VerificationError::CodeExpired.into());
        }

        if record.attempts_exhausted(self.config.max_attempts) {
            self.verifications.delete(&email).await?;
            tracing::warn!(
                email = %masked,
                attempts = record.attempts,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded"
            );
            return Err(VerificationError::AttemptsExceeded.into());
        }

        if !record.matches(code) {
            // None means a concurrent request used up the last attempt
            let attempts = self
                .verifications
                .increment_attempts(&email, self.config.max_attempts)
                .await?
                .unwrap_or(self.config.max_attempts);
            let remaining_attempts = (self.config.max_attempts - attempts).max(0);

            tracing::warn!(
                email = %masked,
                attempts = attempts,
                remaining_attempts = remaining_attempts,
                event = "verification_code_mismatch",
                "Verification code mismatch"
            );
            return Err(VerificationError::CodeMismatch { remaining_attempts }.into());
        }

        // Consuming the record decides which of two racing confirmations wins
        if !self.verifications.delete(&email).await? {
            return Err(VerificationError::NoPendingVerification.into());
        }

        let (subscriber, created) = self.subscribers.upsert(&email, profile).await?;

        tracing::info!(
            email = %masked,
            subscriber_id = %subscriber.id,
            created = created,
            event = "verification_confirmed",
            "Email verified and subscription stored"
        );

        if created && self.config.send_welcome_email {
            self.send_welcome(&subscriber).await;
        }

        Ok(ConfirmCodeResult {
            subscriber,
            created,
        })
    }

    async fn send_welcome(&self, subscriber: &Subscriber) {
        if let Err(e) = self.email_service.send_welcome_email(subscriber).await {
            tracing::warn!(
                email = %mask_email(&subscriber.email),
                error = %e,
                event = "welcome_email_failed",
                "Failed to dispatch welcome email"
            );
        }
    }
}
