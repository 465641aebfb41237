//! Verification repository trait defining the persistence interface for
//! pending email verification records.
//!
//! Records are keyed by normalized email. Implementations must keep at most
//! one record per email and should make `increment_attempts` atomic.

use async_trait::async_trait;

use crate::domain::entities::verification_code::VerificationRecord;
use crate::errors::DomainError;

/// Repository trait for pending verification records
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use wn_core::repositories::VerificationRepository;
/// use wn_core::domain::entities::VerificationRecord;
/// use wn_core::errors::DomainError;
///
/// struct SqlVerificationRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl VerificationRepository for SqlVerificationRepository {
///     async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
///         Ok(())
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>, DomainError> {
///         Ok(None)
///     }
///
///     async fn increment_attempts(&self, email: &str, max_attempts: i32) -> Result<Option<i32>, DomainError> {
///         Ok(None)
///     }
///
///     async fn delete(&self, email: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Insert the record, or replace the existing record for the same email
    ///
    /// Replacing resets the code, attempts and expiry to the new record's values.
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError>;

    /// Find the pending record for a normalized email
    ///
    /// Expired records are returned as-is; expiry is judged by the caller.
    async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>, DomainError>;

    /// Atomically increment `attempts` while it is below `max_attempts`
    ///
    /// # Returns
    /// * `Ok(Some(n))` - The attempt count after the increment
    /// * `Ok(None)` - No record, or the record was already at the limit
    async fn increment_attempts(
        &self,
        email: &str,
        max_attempts: i32,
    ) -> Result<Option<i32>, DomainError>;

    /// Delete the record for an email
    ///
    /// # Returns
    /// * `Ok(true)` - A record was deleted
    /// * `Ok(false)` - No record existed
    async fn delete(&self, email: &str) -> Result<bool, DomainError>;
}
