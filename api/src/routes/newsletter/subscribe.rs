use actix_web::{web, HttpResponse};
use validator::Validate;
use wn_shared::types::ApiResponse;

use super::AppState;
use crate::dto::{SubscriberEnvelope, SubscribeRequest};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/newsletter/subscribe
///
/// Stores a subscription directly, without email verification.
pub async fn subscribe(
    state: web::Data<AppState>,
    request: web::Json<SubscribeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .newsletter_service
        .subscribe(&request.email, request.profile())
        .await
    {
        Ok((subscriber, created)) => {
            let message = if created {
                "Successfully subscribed to the newsletter"
            } else {
                "Subscription updated"
            };
            HttpResponse::Ok().json(ApiResponse::success(
                message,
                SubscriberEnvelope {
                    subscriber: subscriber.into(),
                },
            ))
        }
        Err(error) => domain_error_response(&error),
    }
}
