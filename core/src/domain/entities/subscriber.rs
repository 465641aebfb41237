//! Newsletter subscriber entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wn_shared::types::Language;

/// How often a subscriber receives the vacancy digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterFrequency {
    Daily,
    Weekly,
}

impl Default for NewsletterFrequency {
    fn default() -> Self {
        NewsletterFrequency::Weekly
    }
}

/// Vacancy filters a subscriber wants the newsletter narrowed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionPreferences {
    pub preferred_cities: Vec<String>,
    pub preferred_categories: Vec<String>,
    pub preferred_employment: Vec<String>,
    pub preferred_languages: Vec<String>,
    pub preferred_gender: Option<String>,
    /// Only include vacancies marked as in demand
    pub only_demanded: bool,
    pub frequency: NewsletterFrequency,
}

/// Caller-supplied profile written into the registry on subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriberProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Language,
    pub preferences: SubscriptionPreferences,
}

/// A confirmed newsletter participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    /// Normalized email, unique in the registry
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Language,
    pub preferences: SubscriptionPreferences,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    /// Create an active subscriber from a normalized email and profile
    pub fn new(email: String, profile: SubscriberProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            language: profile.language,
            preferences: profile.preferences,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite profile fields on reconfirmation and reactivate
    ///
    /// Names are only replaced when the new profile carries them.
    pub fn apply_profile(&mut self, profile: SubscriberProfile) {
        if profile.first_name.is_some() {
            self.first_name = profile.first_name;
        }
        if profile.last_name.is_some() {
            self.last_name = profile.last_name;
        }
        self.language = profile.language;
        self.preferences = profile.preferences;
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Mark the subscriber as unsubscribed
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Display name for greetings, if any name part is known
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: &str) -> SubscriberProfile {
        SubscriberProfile {
            first_name: Some(first.to_string()),
            last_name: Some("Levi".to_string()),
            language: Language::Russian,
            preferences: SubscriptionPreferences {
                preferred_cities: vec!["Haifa".to_string()],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_new_subscriber_is_active() {
        let subscriber = Subscriber::new("dana@example.com".to_string(), profile("Dana"));

        assert!(subscriber.is_active);
        assert_eq!(subscriber.language, Language::Russian);
        assert_eq!(subscriber.preferences.preferred_cities, vec!["Haifa"]);
        assert_eq!(subscriber.preferences.frequency, NewsletterFrequency::Weekly);
        assert_eq!(subscriber.display_name().as_deref(), Some("Dana Levi"));
    }

    #[test]
    fn test_apply_profile_reactivates_and_keeps_known_names() {
        let mut subscriber = Subscriber::new("dana@example.com".to_string(), profile("Dana"));
        subscriber.deactivate();
        assert!(!subscriber.is_active);

        subscriber.apply_profile(SubscriberProfile {
            first_name: None,
            last_name: None,
            language: Language::Hebrew,
            preferences: SubscriptionPreferences {
                only_demanded: true,
                frequency: NewsletterFrequency::Daily,
                ..Default::default()
            },
        });

        assert!(subscriber.is_active);
        assert_eq!(subscriber.first_name.as_deref(), Some("Dana"));
        assert_eq!(subscriber.language, Language::Hebrew);
        assert!(subscriber.preferences.only_demanded);
        assert!(subscriber.preferences.preferred_cities.is_empty());
    }

    #[test]
    fn test_preferences_deserialize_from_partial_camel_case() {
        let json = r#"{ "preferredCities": ["Tel Aviv"], "frequency": "daily" }"#;
        let preferences: SubscriptionPreferences = serde_json::from_str(json).unwrap();

        assert_eq!(preferences.preferred_cities, vec!["Tel Aviv"]);
        assert_eq!(preferences.frequency, NewsletterFrequency::Daily);
        assert!(!preferences.only_demanded);
    }
}
