use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::subscriber::{Subscriber, SubscriberProfile};
use crate::errors::DomainError;

use super::r#trait::SubscriberRepository;

/// In-memory subscriber registry
#[derive(Clone, Default)]
pub struct InMemorySubscriberRepository {
    subscribers: Arc<RwLock<HashMap<String, Subscriber>>>,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored subscribers, including inactive ones
    pub async fn len(&self) -> usize {
        self.subscribers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.subscribers.read().await.is_empty()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, DomainError> {
        Ok(self.subscribers.read().await.get(email).cloned())
    }

    async fn upsert(
        &self,
        email: &str,
        profile: SubscriberProfile,
    ) -> Result<(Subscriber, bool), DomainError> {
        let mut subscribers = self.subscribers.write().await;
        match subscribers.get_mut(email) {
            Some(existing) => {
                existing.apply_profile(profile);
                Ok((existing.clone(), false))
            }
            None => {
                let subscriber = Subscriber::new(email.to_string(), profile);
                subscribers.insert(email.to_string(), subscriber.clone());
                Ok((subscriber, true))
            }
        }
    }

    async fn deactivate(&self, email: &str) -> Result<bool, DomainError> {
        let mut subscribers = self.subscribers.write().await;
        match subscribers.get_mut(email) {
            Some(subscriber) => {
                subscriber.deactivate();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
