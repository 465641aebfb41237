//! Shared utilities and common types for the WorkNow server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (email normalization and validation)
//! - Common type definitions

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, EmailConfig, VerificationConfig,
    ServerConfig, CorsConfig, LoggingConfig
};
pub use errors::{ErrorResponse, error_codes};
pub use types::{Language, ApiResponse, HealthResponse};
pub use utils::validation;
