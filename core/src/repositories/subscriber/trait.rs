//! Subscriber repository trait for the newsletter registry.

use async_trait::async_trait;

use crate::domain::entities::subscriber::{Subscriber, SubscriberProfile};
use crate::errors::DomainError;

/// Repository trait for newsletter subscribers, keyed by normalized email
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Find a subscriber by normalized email, active or not
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, DomainError>;

    /// Create the subscriber, or apply the profile to the existing one
    ///
    /// # Returns
    /// * `Ok((subscriber, true))` - A new subscriber was created
    /// * `Ok((subscriber, false))` - An existing subscriber was updated and reactivated
    async fn upsert(
        &self,
        email: &str,
        profile: SubscriberProfile,
    ) -> Result<(Subscriber, bool), DomainError>;

    /// Mark the subscriber as inactive
    ///
    /// Returns `false` when no subscriber exists for the email.
    async fn deactivate(&self, email: &str) -> Result<bool, DomainError>;
}
