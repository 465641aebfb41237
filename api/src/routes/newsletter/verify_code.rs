use actix_web::{web, HttpResponse};
use validator::Validate;
use wn_shared::types::ApiResponse;

use super::AppState;
use crate::dto::{SubscriberEnvelope, VerifyCodeRequest};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/newsletter/verify-code
///
/// Confirms the emailed code and stores the subscription.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "dana@example.com",
///     "code": "123456",
///     "firstName": "Dana",
///     "language": "he",
///     "preferences": { "preferredCities": ["Haifa"], "frequency": "daily" }
/// }
/// ```
///
/// ## Errors
/// - 400 wrong code, with `remainingAttempts`
/// - 404 no pending verification
/// - 410 code expired
/// - 429 attempts exhausted
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .verification_service
        .confirm_code(&request.email, &request.code, request.profile())
        .await
    {
        Ok(result) => {
            let message = if result.created {
                "Email verified. You are now subscribed to the newsletter"
            } else {
                "Email verified. Your subscription has been updated"
            };
            HttpResponse::Ok().json(ApiResponse::success(
                message,
                SubscriberEnvelope {
                    subscriber: result.subscriber.into(),
                },
            ))
        }
        Err(error) => domain_error_response(&error),
    }
}
