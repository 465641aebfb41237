use actix_web::{web, HttpResponse};
use validator::Validate;
use wn_shared::types::ApiResponse;

use super::AppState;
use crate::dto::UnsubscribeRequest;
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/newsletter/unsubscribe
///
/// Unknown emails get 404.
pub async fn unsubscribe(
    state: web::Data<AppState>,
    request: web::Json<UnsubscribeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.newsletter_service.unsubscribe(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "Successfully unsubscribed from the newsletter",
        )),
        Err(error) => domain_error_response(&error),
    }
}
