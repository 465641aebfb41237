//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository implementations for verification records and subscribers
//! - Embedded migrations (`infra/migrations`)

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlSubscriberRepository, MySqlVerificationRepository};
