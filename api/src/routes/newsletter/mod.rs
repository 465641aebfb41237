//! Newsletter route handlers
//!
//! This module contains the newsletter subscription endpoints:
//! - Email verification (sending and confirming codes)
//! - Direct subscribe and unsubscribe
//! - Subscription lookup

pub mod check_subscription;
pub mod send_verification;
pub mod subscribe;
pub mod unsubscribe;
pub mod verify_code;

use actix_web::web;
use std::sync::Arc;

use wn_core::repositories::{SubscriberRepository, VerificationRepository};
use wn_core::services::{
    EmailServiceTrait, NewsletterService, VerificationService, VerificationServiceConfig,
};
use wn_infra::InfrastructureServices;

pub type DynVerificationService =
    VerificationService<dyn EmailServiceTrait, dyn VerificationRepository, dyn SubscriberRepository>;
pub type DynNewsletterService = NewsletterService<dyn EmailServiceTrait, dyn SubscriberRepository>;

/// Application state that holds shared services
pub struct AppState {
    pub verification_service: Arc<DynVerificationService>,
    pub newsletter_service: Arc<DynNewsletterService>,
    /// Backends behind the services, probed by the health check
    pub infrastructure: InfrastructureServices,
}

impl AppState {
    pub fn new(infrastructure: InfrastructureServices, config: VerificationServiceConfig) -> Self {
        Self {
            verification_service: Arc::new(VerificationService::new(
                infrastructure.email.clone(),
                infrastructure.verifications.clone(),
                infrastructure.subscribers.clone(),
                config,
            )),
            newsletter_service: Arc::new(NewsletterService::new(
                infrastructure.email.clone(),
                infrastructure.subscribers.clone(),
            )),
            infrastructure,
        }
    }
}

/// Register the `/newsletter` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/newsletter")
            .route(
                "/send-verification",
                web::post().to(send_verification::send_verification),
            )
            .route("/verify-code", web::post().to(verify_code::verify_code))
            .route("/subscribe", web::post().to(subscribe::subscribe))
            .route("/unsubscribe", web::post().to(unsubscribe::unsubscribe))
            .route(
                "/check-subscription",
                web::get().to(check_subscription::check_subscription),
            ),
    );
}
