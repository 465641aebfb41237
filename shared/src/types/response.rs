//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
///
/// Serializes as `{ "success": true, "message": "...", ...data }` with the
/// payload fields flattened into the top-level object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response payload, flattened
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create a successful response with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status, `healthy` or `degraded`
    pub status: String,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Storage backend in use
    pub storage: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Build a healthy response for the given service and storage backend
    pub fn healthy(
        service: impl Into<String>,
        version: impl Into<String>,
        storage: impl Into<String>,
    ) -> Self {
        Self {
            status: String::from("healthy"),
            service: service.into(),
            version: version.into(),
            storage: storage.into(),
            timestamp: Utc::now(),
        }
    }

    /// Mark the response as degraded, e.g. when storage is unreachable
    pub fn degraded(mut self) -> Self {
        self.status = String::from("degraded");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Payload {
        email: String,
    }

    #[test]
    fn test_success_response_flattens_data() {
        let response = ApiResponse::success(
            "Verification code sent",
            Payload { email: "user@example.com".to_string() },
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Verification code sent");
        assert_eq!(json["email"], "user@example.com");
    }

    #[test]
    fn test_message_only_response() {
        let response = ApiResponse::<Payload>::message("Unsubscribed");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_health_response_status() {
        let health = HealthResponse::healthy("api", "0.1.0", "mysql");
        assert_eq!(health.status, "healthy");
        assert_eq!(health.degraded().status, "degraded");
    }
}
