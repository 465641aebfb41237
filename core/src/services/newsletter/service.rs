//! Direct subscription management outside the code verification flow

use std::sync::Arc;
use wn_shared::utils::validation::mask_email;

use crate::domain::entities::subscriber::{Subscriber, SubscriberProfile};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SubscriberRepository;
use crate::services::normalized_email;
use crate::services::verification::EmailServiceTrait;

/// Subscription lookup result
#[derive(Debug, Clone)]
pub struct SubscriptionStatus {
    /// True only for an existing, active subscriber
    pub is_subscribed: bool,
    pub subscriber: Option<Subscriber>,
}

/// Subscriber registry operations that do not go through code verification
pub struct NewsletterService<E: ?Sized, S: ?Sized> {
    email_service: Arc<E>,
    subscribers: Arc<S>,
}

impl<E, S> NewsletterService<E, S>
where
    E: EmailServiceTrait + ?Sized,
    S: SubscriberRepository + ?Sized,
{
    pub fn new(email_service: Arc<E>, subscribers: Arc<S>) -> Self {
        Self {
            email_service,
            subscribers,
        }
    }

    /// Create or update a subscriber directly
    ///
    /// A welcome email is sent when the subscriber is new; failures are logged only.
    pub async fn subscribe(
        &self,
        email: &str,
        profile: SubscriberProfile,
    ) -> DomainResult<(Subscriber, bool)> {
        let email = normalized_email(email)?;
        let (subscriber, created) = self.subscribers.upsert(&email, profile).await?;

        tracing::info!(
            email = %mask_email(&email),
            subscriber_id = %subscriber.id,
            created = created,
            event = "subscriber_stored",
            "Newsletter subscription stored"
        );

        if created {
            if let Err(e) = self.email_service.send_welcome_email(&subscriber).await {
                tracing::warn!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "welcome_email_failed",
                    "Failed to dispatch welcome email"
                );
            }
        }

        Ok((subscriber, created))
    }

    /// Deactivate a subscriber
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::NotFound)` - No subscriber exists for the email
    pub async fn unsubscribe(&self, email: &str) -> DomainResult<()> {
        let email = normalized_email(email)?;

        if !self.subscribers.deactivate(&email).await? {
            return Err(DomainError::NotFound {
                resource: "subscriber".to_string(),
            });
        }

        tracing::info!(
            email = %mask_email(&email),
            event = "subscriber_deactivated",
            "Newsletter subscription cancelled"
        );
        Ok(())
    }

    /// Report whether an email has an active subscription
    pub async fn check_subscription(&self, email: &str) -> DomainResult<SubscriptionStatus> {
        let email = normalized_email(email)?;
        let subscriber = self.subscribers.find_by_email(&email).await?;

        Ok(SubscriptionStatus {
            is_subscribed: subscriber.as_ref().map_or(false, |s| s.is_active),
            subscriber,
        })
    }
}
