use wn_core::domain::entities::{Subscriber, SubscriberProfile};
use wn_core::services::{EmailServiceTrait, VerificationEmail};

use crate::email::{EmailServiceAdapter, MockEmailService};

#[tokio::test]
async fn test_adapter_renders_verification_template() {
    let adapter = EmailServiceAdapter::new(MockEmailService::recording());

    let id = adapter
        .send_verification_code(&VerificationEmail {
            to: "dana@example.com".to_string(),
            code: "123456".to_string(),
            first_name: None,
            expiration_minutes: 5,
        })
        .await
        .unwrap();
    assert!(id.starts_with("mock-"));

    let sent = adapter.inner().sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "dana@example.com");
    assert!(sent[0].text.contains("123456"));
}

#[tokio::test]
async fn test_adapter_reports_provider_failure_as_string() {
    let adapter = EmailServiceAdapter::new(MockEmailService::failing());
    let subscriber = Subscriber::new("dana@example.com".to_string(), SubscriberProfile::default());

    let error = adapter.send_welcome_email(&subscriber).await.unwrap_err();
    assert!(error.contains("Simulated email delivery failure"));
}
