//! HTTP-level tests for the newsletter routes, running the real route table
//! against in-memory stores and a capturing email double.

use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use wn_api::{create_app, AppState};
use wn_core::domain::entities::{Subscriber, VerificationRecord};
use wn_core::repositories::{
    InMemorySubscriberRepository, InMemoryVerificationRepository, VerificationRepository,
};
use wn_core::services::{EmailServiceTrait, VerificationEmail, VerificationServiceConfig};
use wn_infra::InfrastructureServices;
use wn_shared::config::CorsConfig;

#[derive(Default)]
struct CapturingEmail {
    last_code: Mutex<Option<String>>,
    welcomed: Mutex<Vec<String>>,
}

impl CapturingEmail {
    fn last_code(&self) -> String {
        self.last_code.lock().unwrap().clone().expect("no code sent")
    }
}

#[async_trait]
impl EmailServiceTrait for CapturingEmail {
    async fn send_verification_code(&self, email: &VerificationEmail) -> Result<String, String> {
        *self.last_code.lock().unwrap() = Some(email.code.clone());
        Ok("captured".to_string())
    }

    async fn send_welcome_email(&self, subscriber: &Subscriber) -> Result<String, String> {
        self.welcomed.lock().unwrap().push(subscriber.email.clone());
        Ok("captured".to_string())
    }
}

struct Harness {
    email: Arc<CapturingEmail>,
    verifications: Arc<InMemoryVerificationRepository>,
    state: web::Data<AppState>,
}

fn harness() -> Harness {
    let email = Arc::new(CapturingEmail::default());
    let verifications = Arc::new(InMemoryVerificationRepository::new());
    let infrastructure = InfrastructureServices::with_repositories(
        verifications.clone(),
        Arc::new(InMemorySubscriberRepository::new()),
        email.clone(),
    );
    let state = web::Data::new(AppState::new(
        infrastructure,
        VerificationServiceConfig::default(),
    ));
    Harness {
        email,
        verifications,
        state,
    }
}

macro_rules! app {
    ($harness:expr) => {
        test::init_service(create_app(
            $harness.state.clone(),
            &CorsConfig::development(),
            64 * 1024,
        ))
        .await
    };
}

fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

#[actix_web::test]
async fn test_health_reports_storage() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_full_subscription_flow() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/send-verification")
        .set_json(json!({ "email": "  Dana@Example.COM ", "firstName": "Dana" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email"], "dana@example.com");
    assert!(body["expiresAt"].is_string());

    let code = h.email.last_code();
    let req = test::TestRequest::post()
        .uri("/api/newsletter/verify-code")
        .set_json(json!({
            "email": "dana@example.com",
            "code": code,
            "firstName": "Dana",
            "language": "he",
            "preferences": { "preferredCities": ["Haifa"] }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["subscriber"]["email"], "dana@example.com");
    assert_eq!(body["subscriber"]["isActive"], true);
    assert_eq!(body["subscriber"]["language"], "he");
    assert_eq!(h.email.welcomed.lock().unwrap().len(), 1);

    // The code is single use
    let req = test::TestRequest::post()
        .uri("/api/newsletter/verify-code")
        .set_json(json!({ "email": "dana@example.com", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/newsletter/check-subscription?email=Dana%40example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isSubscribed"], true);
    assert_eq!(body["subscriber"]["firstName"], "Dana");

    let req = test::TestRequest::post()
        .uri("/api/newsletter/unsubscribe")
        .set_json(json!({ "email": "dana@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/newsletter/check-subscription?email=dana%40example.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["isSubscribed"], false);
}

#[actix_web::test]
async fn test_wrong_code_reports_remaining_attempts_then_locks() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/send-verification")
        .set_json(json!({ "email": "yossi@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let bad = wrong_code(&h.email.last_code());

    for remaining in [2, 1, 0] {
        let req = test::TestRequest::post()
            .uri("/api/newsletter/verify-code")
            .set_json(json!({ "email": "yossi@example.com", "code": bad }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");
        assert_eq!(body["remainingAttempts"], remaining);
    }

    let req = test::TestRequest::post()
        .uri("/api/newsletter/verify-code")
        .set_json(json!({ "email": "yossi@example.com", "code": h.email.last_code() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // Exhausted records are discarded
    assert!(h.verifications.is_empty().await);
}

#[actix_web::test]
async fn test_expired_code_returns_gone() {
    let h = harness();
    let app = app!(h);

    let mut record = VerificationRecord::issue("late@example.com".to_string(), 5);
    record.expires_at = record.created_at - chrono::Duration::minutes(1);
    h.verifications.upsert(&record).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/newsletter/verify-code")
        .set_json(json!({ "email": "late@example.com", "code": record.code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    assert!(h.verifications.is_empty().await);
}

#[actix_web::test]
async fn test_invalid_email_is_rejected() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/send-verification")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.email.last_code.lock().unwrap().is_none());
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/verify-code")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ \"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_unsubscribe_unknown_email() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/unsubscribe")
        .set_json(json!({ "email": "ghost@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SUBSCRIBER_NOT_FOUND");
}

#[actix_web::test]
async fn test_direct_subscribe_and_unknown_route() {
    let h = harness();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/subscribe")
        .set_json(json!({ "email": "noa@example.com", "language": "ru" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["subscriber"]["language"], "ru");

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
