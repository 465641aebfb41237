use actix_web::{web, HttpResponse};
use validator::Validate;

use super::AppState;
use crate::dto::{CheckSubscriptionQuery, CheckSubscriptionResponse};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for GET /api/newsletter/check-subscription?email=
///
/// `isSubscribed` is true only for an active subscriber.
pub async fn check_subscription(
    state: web::Data<AppState>,
    query: web::Query<CheckSubscriptionQuery>,
) -> HttpResponse {
    if let Err(errors) = query.validate() {
        return validation_error_response(&errors);
    }

    match state.newsletter_service.check_subscription(&query.email).await {
        Ok(status) => HttpResponse::Ok().json(CheckSubscriptionResponse {
            is_subscribed: status.is_subscribed,
            subscriber: status.subscriber.map(Into::into),
        }),
        Err(error) => domain_error_response(&error),
    }
}
