//! In-memory implementation of VerificationRepository
//!
//! Used for local development without a database and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::VerificationRecord;
use crate::errors::DomainError;

use super::r#trait::VerificationRepository;

/// Verification records held in a process-local map
#[derive(Clone, Default)]
pub struct InMemoryVerificationRepository {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
}

impl InMemoryVerificationRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no records are pending
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn increment_attempts(
        &self,
        email: &str,
        max_attempts: i32,
    ) -> Result<Option<i32>, DomainError> {
        // Check and increment under one write lock
        let mut records = self.records.write().await;
        match records.get_mut(email) {
            Some(record) if record.attempts < max_attempts => {
                record.attempts += 1;
                Ok(Some(record.attempts))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(email).is_some())
    }
}
