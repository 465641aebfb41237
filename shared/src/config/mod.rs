//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email provider configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `verification` - Verification code lifetime and attempt limits

pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use verification::VerificationConfig;

/// Prefix for environment variable overrides, e.g. `WORKNOW__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "WORKNOW";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration. Without a URL the in-memory stores are used.
    pub database: DatabaseConfig,

    /// Verification code policy
    pub verification: VerificationConfig,

    /// Email provider configuration
    pub email: EmailConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::default(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Self::default()
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for the given environment
    ///
    /// Sources, later ones winning:
    /// 1. Built-in defaults for `environment`
    /// 2. `config.{environment}.toml` in the working directory (optional)
    /// 3. `WORKNOW__SECTION__KEY` environment variables
    /// 4. Legacy flat variables (`DATABASE_URL`, `SERVER_PORT`, `EMAIL_API_KEY`, ...)
    pub fn load_for(environment: Environment) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Self::for_environment(environment))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_override("environment", environment.to_string())?
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;
        app_config.apply_legacy_env();
        Ok(app_config)
    }

    /// Overlay the flat environment variables used by existing deployments
    fn apply_legacy_env(&mut self) {
        if let Some(url) = DatabaseConfig::url_from_env() {
            self.database.url = Some(url);
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(key) = std::env::var("EMAIL_API_KEY") {
            self.email.api_key = Some(key);
        }
        if let Some(provider) = std::env::var("EMAIL_PROVIDER").ok().and_then(|p| p.parse().ok()) {
            self.email.provider = provider;
        }
    }

    /// Whether persistent storage is configured
    pub fn uses_database(&self) -> bool {
        self.database.url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_memory_storage() {
        let config = AppConfig::default();
        assert!(!config.uses_database());
        assert_eq!(config.verification.code_expiration_minutes, 5);
        assert_eq!(config.verification.max_attempts, 3);
        assert_eq!(config.email.provider, EmailProvider::Mock);
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert!(config.environment.is_development());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_uses_defaults_of_loaded_environment() {
        let config = AppConfig::load_for(Environment::Production).unwrap();

        assert!(config.environment.is_production());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.source_location);
        assert_eq!(config.verification.max_attempts, 3);
    }

    #[test]
    fn test_for_environment_keeps_other_defaults() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.email.provider, EmailProvider::Mock);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{
            "environment": "production",
            "server": { "host": "0.0.0.0", "port": 9000 },
            "verification": { "code_expiration_minutes": 10 }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert!(config.environment.is_production());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.verification.code_expiration_minutes, 10);
        assert_eq!(config.verification.max_attempts, 3);
        assert!(config.database.url.is_none());
    }
}
