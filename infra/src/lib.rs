//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the WorkNow newsletter
//! backend. It provides concrete implementations of the repository and email
//! traits declared in `wn_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx
//! - **Email**: Email providers (Resend HTTP API, mock) and message templates
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use std::sync::Arc;

use wn_core::errors::DomainError;
use wn_core::repositories::{
    InMemorySubscriberRepository, InMemoryVerificationRepository, SubscriberRepository,
    VerificationRepository,
};
use wn_core::services::EmailServiceTrait;
use wn_shared::config::AppConfig;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - outbound email providers and templates
pub mod email;

/// Storage and delivery backends selected from configuration
#[derive(Clone)]
pub struct InfrastructureServices {
    pub verifications: Arc<dyn VerificationRepository>,
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub email: Arc<dyn EmailServiceTrait>,
    /// Present when running against MySQL
    #[cfg(feature = "mysql")]
    pub database: Option<database::DatabasePool>,
}

impl InfrastructureServices {
    /// Backends that keep everything in process memory
    pub fn in_memory(email: Arc<dyn EmailServiceTrait>) -> Self {
        Self {
            verifications: Arc::new(InMemoryVerificationRepository::new()),
            subscribers: Arc::new(InMemorySubscriberRepository::new()),
            email,
            #[cfg(feature = "mysql")]
            database: None,
        }
    }

    /// Repositories supplied by the caller, with no database pool
    pub fn with_repositories(
        verifications: Arc<dyn VerificationRepository>,
        subscribers: Arc<dyn SubscriberRepository>,
        email: Arc<dyn EmailServiceTrait>,
    ) -> Self {
        Self {
            verifications,
            subscribers,
            email,
            #[cfg(feature = "mysql")]
            database: None,
        }
    }

    /// Name of the active storage backend, reported by the health check
    pub fn storage_name(&self) -> &'static str {
        #[cfg(feature = "mysql")]
        {
            if self.database.is_some() {
                return "mysql";
            }
        }
        "memory"
    }

    /// Check that the storage backend answers. In-memory storage is always reachable.
    pub async fn check_storage(&self) -> Result<(), InfrastructureError> {
        #[cfg(feature = "mysql")]
        {
            if let Some(pool) = &self.database {
                if !pool.health_check().await? {
                    return Err(InfrastructureError::Config(
                        "Database health query returned an unexpected value".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Release pooled connections on shutdown
    pub async fn shutdown(&self) {
        #[cfg(feature = "mysql")]
        {
            if let Some(pool) = &self.database {
                pool.close().await;
            }
        }
        tracing::info!("Infrastructure services shut down");
    }
}

/// Initialize infrastructure services from application configuration
///
/// This function sets up:
/// - The email provider
/// - The MySQL pool, migrations and repositories when a database URL is configured
/// - In-memory repositories otherwise
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let email = email::create_email_service(&config.email, config.environment)?;

    #[cfg(feature = "mysql")]
    {
        if config.uses_database() {
            let pool = database::DatabasePool::new(config.database.clone()).await?;
            pool.run_migrations().await?;

            let services = InfrastructureServices {
                verifications: Arc::new(database::MySqlVerificationRepository::new(
                    pool.get_pool().clone(),
                )),
                subscribers: Arc::new(database::MySqlSubscriberRepository::new(
                    pool.get_pool().clone(),
                )),
                email,
                database: Some(pool),
            };
            tracing::info!(storage = "mysql", "Infrastructure services initialized successfully");
            return Ok(services);
        }
    }

    tracing::warn!(
        storage = "memory",
        "No database URL configured; using in-memory storage"
    );
    Ok(InfrastructureServices::in_memory(email))
}


/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected or failed the request
    #[error("Email service error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::storage(error.to_string())
    }
}
