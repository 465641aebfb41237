//! MySQL implementation of the SubscriberRepository trait.
//!
//! Preferences are stored as camelCase JSON text in the `preferences` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use wn_core::domain::entities::{Subscriber, SubscriberProfile, SubscriptionPreferences};
use wn_core::errors::DomainError;
use wn_core::repositories::SubscriberRepository;
use wn_shared::types::Language;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, first_name, last_name, language, preferences,
           is_active, created_at, updated_at
    FROM newsletter_subscribers
"#;

/// MySQL implementation of SubscriberRepository
pub struct MySqlSubscriberRepository {
    pool: MySqlPool,
}

impl MySqlSubscriberRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_subscriber(row: &sqlx::mysql::MySqlRow) -> Result<Subscriber, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to get id: {}", e)))?;
        let language: String = row
            .try_get("language")
            .map_err(|e| DomainError::storage(format!("Failed to get language: {}", e)))?;
        let preferences: String = row
            .try_get("preferences")
            .map_err(|e| DomainError::storage(format!("Failed to get preferences: {}", e)))?;

        Ok(Subscriber {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("Invalid subscriber UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::storage(format!("Failed to get email: {}", e)))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::storage(format!("Failed to get first_name: {}", e)))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::storage(format!("Failed to get last_name: {}", e)))?,
            language: language.parse::<Language>().map_err(DomainError::storage)?,
            preferences: serde_json::from_str::<SubscriptionPreferences>(&preferences)
                .map_err(|e| DomainError::storage(format!("Invalid preferences JSON: {}", e)))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::storage(format!("Failed to get is_active: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::storage(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    fn preferences_json(subscriber: &Subscriber) -> Result<String, DomainError> {
        serde_json::to_string(&subscriber.preferences)
            .map_err(|e| DomainError::storage(format!("Failed to encode preferences: {}", e)))
    }

    async fn find_for_update(
        tx: &mut Transaction<'_, MySql>,
        email: &str,
    ) -> Result<Option<Subscriber>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1 FOR UPDATE", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to lock subscriber: {}", e)))?;

        row.as_ref().map(Self::row_to_subscriber).transpose()
    }

    /// Returns `false` when a concurrent insert already claimed the email.
    async fn insert(tx: &mut Transaction<'_, MySql>, subscriber: &Subscriber) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO newsletter_subscribers (
                id, email, first_name, last_name, language, preferences,
                is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(subscriber.id.to_string())
            .bind(&subscriber.email)
            .bind(&subscriber.first_name)
            .bind(&subscriber.last_name)
            .bind(subscriber.language.code())
            .bind(Self::preferences_json(subscriber)?)
            .bind(subscriber.is_active)
            .bind(subscriber.created_at)
            .bind(subscriber.updated_at)
            .execute(&mut **tx)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(DomainError::storage(format!("Failed to create subscriber: {}", e))),
        }
    }

    async fn upsert_once(
        &self,
        email: &str,
        profile: SubscriberProfile,
    ) -> Result<Option<(Subscriber, bool)>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let result = match Self::find_for_update(&mut tx, email).await? {
            Some(mut existing) => {
                existing.apply_profile(profile);
                Self::update(&mut tx, &existing).await?;
                (existing, false)
            }
            None => {
                let subscriber = Subscriber::new(email.to_string(), profile);
                if !Self::insert(&mut tx, &subscriber).await? {
                    tx.rollback()
                        .await
                        .map_err(|e| DomainError::storage(format!("Failed to roll back: {}", e)))?;
                    return Ok(None);
                }
                (subscriber, true)
            }
        };

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        Ok(Some(result))
    }

    async fn update(tx: &mut Transaction<'_, MySql>, subscriber: &Subscriber) -> Result<(), DomainError> {
        let query = r#"
            UPDATE newsletter_subscribers
            SET first_name = ?, last_name = ?, language = ?, preferences = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(&subscriber.first_name)
            .bind(&subscriber.last_name)
            .bind(subscriber.language.code())
            .bind(Self::preferences_json(subscriber)?)
            .bind(subscriber.is_active)
            .bind(subscriber.updated_at)
            .bind(subscriber.id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update subscriber: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl SubscriberRepository for MySqlSubscriberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find subscriber: {}", e)))?;

        row.as_ref().map(Self::row_to_subscriber).transpose()
    }

    async fn upsert(
        &self,
        email: &str,
        profile: SubscriberProfile,
    ) -> Result<(Subscriber, bool), DomainError> {
        // A lost insert race leaves the winner's row committed, so the retry updates it
        if let Some(result) = self.upsert_once(email, profile.clone()).await? {
            return Ok(result);
        }
        tracing::debug!(email = %email, "Subscriber insert raced, retrying as update");

        self.upsert_once(email, profile).await?.ok_or_else(|| {
            DomainError::storage(format!("Subscriber upsert kept conflicting for {}", email))
        })
    }

    async fn deactivate(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE newsletter_subscribers SET is_active = FALSE, updated_at = ? WHERE email = ?",
        )
        .bind(Utc::now())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to deactivate subscriber: {}", e)))?;

        // updated_at always changes, so any existing row counts as affected
        Ok(result.rows_affected() > 0)
    }
}
