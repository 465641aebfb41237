use crate::domain::entities::subscriber::{SubscriberProfile, SubscriptionPreferences};
use crate::repositories::subscriber::{InMemorySubscriberRepository, SubscriberRepository};
use wn_shared::types::Language;

fn profile(first_name: Option<&str>, language: Language) -> SubscriberProfile {
    SubscriberProfile {
        first_name: first_name.map(str::to_string),
        last_name: None,
        language,
        preferences: SubscriptionPreferences::default(),
    }
}

#[tokio::test]
async fn test_upsert_creates_then_updates() {
    let repo = InMemorySubscriberRepository::new();

    let (created, is_new) = repo
        .upsert("dana@example.com", profile(Some("Dana"), Language::English))
        .await
        .unwrap();
    assert!(is_new);
    assert!(created.is_active);

    let (updated, is_new) = repo
        .upsert("dana@example.com", profile(None, Language::Hebrew))
        .await
        .unwrap();
    assert!(!is_new);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name.as_deref(), Some("Dana"));
    assert_eq!(updated.language, Language::Hebrew);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_deactivate_and_reactivate() {
    let repo = InMemorySubscriberRepository::new();
    repo.upsert("dana@example.com", profile(None, Language::English))
        .await
        .unwrap();

    assert!(repo.deactivate("dana@example.com").await.unwrap());
    let stored = repo.find_by_email("dana@example.com").await.unwrap().unwrap();
    assert!(!stored.is_active);

    let (reactivated, is_new) = repo
        .upsert("dana@example.com", profile(None, Language::English))
        .await
        .unwrap();
    assert!(!is_new);
    assert!(reactivated.is_active);
}

#[tokio::test]
async fn test_deactivate_unknown_email() {
    let repo = InMemorySubscriberRepository::new();

    assert!(!repo.deactivate("ghost@example.com").await.unwrap());
    assert!(repo.find_by_email("ghost@example.com").await.unwrap().is_none());
    assert!(repo.is_empty().await);
}
