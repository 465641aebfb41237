use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use wn_core::domain::entities::{Subscriber, SubscriberProfile, SubscriptionPreferences};
use wn_shared::types::Language;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    /// Used in the code email greeting
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationResponse {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub language: Option<Language>,
    pub preferences: Option<SubscriptionPreferences>,
}

impl VerifyCodeRequest {
    /// Profile to store for the subscriber once the code is accepted
    pub fn profile(&self) -> SubscriberProfile {
        SubscriberProfile {
            first_name: non_blank(&self.first_name),
            last_name: non_blank(&self.last_name),
            language: self.language.unwrap_or_default(),
            preferences: self.preferences.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub language: Option<Language>,
    #[serde(default)]
    pub preferences: SubscriptionPreferences,
}

impl SubscribeRequest {
    pub fn profile(&self) -> SubscriberProfile {
        SubscriberProfile {
            first_name: non_blank(&self.first_name),
            last_name: non_blank(&self.last_name),
            language: self.language.unwrap_or_default(),
            preferences: self.preferences.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckSubscriptionQuery {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

/// Subscriber as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Language,
    pub preferences: SubscriptionPreferences,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subscriber> for SubscriberResponse {
    fn from(subscriber: Subscriber) -> Self {
        Self {
            id: subscriber.id,
            email: subscriber.email,
            first_name: subscriber.first_name,
            last_name: subscriber.last_name,
            language: subscriber.language,
            preferences: subscriber.preferences,
            is_active: subscriber.is_active,
            created_at: subscriber.created_at,
            updated_at: subscriber.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberEnvelope {
    pub subscriber: SubscriberResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSubscriptionResponse {
    pub is_subscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<SubscriberResponse>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
