//! MySQL implementation of the VerificationRepository trait.
//!
//! Rows live in `newsletter_verifications`, keyed by normalized email.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use wn_core::domain::entities::VerificationRecord;
use wn_core::errors::DomainError;
use wn_core::repositories::VerificationRepository;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, DomainError> {
        Ok(VerificationRecord {
            email: row
                .try_get("email")
                .map_err(|e| DomainError::storage(format!("Failed to get email: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::storage(format!("Failed to get code: {}", e)))?,
            attempts: row
                .try_get("attempts")
                .map_err(|e| DomainError::storage(format!("Failed to get attempts: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage(format!("Failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::storage(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO newsletter_verifications (
                email, code, attempts, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                attempts = VALUES(attempts),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to store verification code: {}", e)))?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>, DomainError> {
        let query = r#"
            SELECT email, code, attempts, created_at, expires_at
            FROM newsletter_verifications
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find verification code: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn increment_attempts(
        &self,
        email: &str,
        max_attempts: i32,
    ) -> Result<Option<i32>, DomainError> {
        // The row lock keeps the increment and the read-back consistent
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let updated = sqlx::query(
            "UPDATE newsletter_verifications SET attempts = attempts + 1 WHERE email = ? AND attempts < ?",
        )
        .bind(email)
        .bind(max_attempts)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to increment attempts: {}", e)))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::storage(format!("Failed to roll back: {}", e)))?;
            return Ok(None);
        }

        let attempts: i32 =
            sqlx::query_scalar("SELECT attempts FROM newsletter_verifications WHERE email = ?")
                .bind(email)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to read attempts: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        Ok(Some(attempts))
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM newsletter_verifications WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete verification code: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
