use actix_web::{web, HttpResponse};
use validator::Validate;
use wn_shared::types::ApiResponse;
use wn_shared::utils::validation::mask_email;

use super::AppState;
use crate::dto::{SendVerificationRequest, SendVerificationResponse};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/newsletter/send-verification
///
/// Issues a 6-digit code for the email and sends it. Email delivery is best
/// effort: the response is successful once the code is stored.
///
/// # Request Body
///
/// ```json
/// { "email": "dana@example.com", "firstName": "Dana" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification code sent to your email",
///     "email": "dana@example.com",
///     "expiresAt": "2024-05-01T10:05:00Z"
/// }
/// ```
pub async fn send_verification(
    state: web::Data<AppState>,
    request: web::Json<SendVerificationRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    tracing::info!(
        email = %mask_email(request.email.trim()),
        "Processing send-verification request"
    );

    match state
        .verification_service
        .request_code(&request.email, request.first_name.as_deref())
        .await
    {
        Ok(result) => {
            if !result.email_dispatched {
                tracing::warn!(
                    email = %mask_email(&result.email),
                    "Verification code stored but email was not delivered"
                );
            }
            HttpResponse::Ok().json(ApiResponse::success(
                "Verification code sent to your email",
                SendVerificationResponse {
                    email: result.email,
                    expires_at: result.expires_at,
                },
            ))
        }
        Err(error) => domain_error_response(&error),
    }
}
