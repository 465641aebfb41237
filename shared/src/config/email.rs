//! Email provider configuration

use serde::{Deserialize, Serialize};

/// Outbound email provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    Mock,
    /// Resend HTTP API
    Resend,
}

impl Default for EmailProvider {
    fn default() -> Self {
        EmailProvider::Mock
    }
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "console" => Ok(EmailProvider::Mock),
            "resend" => Ok(EmailProvider::Resend),
            _ => Err(format!("Unsupported email provider: {}", s)),
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Which provider delivers messages
    pub provider: EmailProvider,

    /// Provider API key
    pub api_key: Option<String>,

    /// Sender, e.g. `WorkNow <noreply@worknow.co.il>`
    pub from_address: String,

    /// Provider API base URL
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retries for transient provider failures
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubles each retry)
    pub retry_delay_ms: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_key: None,
            from_address: String::from("WorkNow <noreply@worknow.co.il>"),
            api_base_url: String::from("https://api.resend.com"),
            request_timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("resend".parse::<EmailProvider>().unwrap(), EmailProvider::Resend);
        assert_eq!("MOCK".parse::<EmailProvider>().unwrap(), EmailProvider::Mock);
        assert!("smtp".parse::<EmailProvider>().is_err());
    }
}
