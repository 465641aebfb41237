//! Mapping from domain and request errors to HTTP responses
//!
//! | Error | Status |
//! |---|---|
//! | validation | 400 |
//! | no pending verification | 404 |
//! | code expired | 410 |
//! | attempts exceeded | 429 |
//! | code mismatch | 400, with `remainingAttempts` |
//! | storage | 500 |
//! | subscriber not found | 404 |

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

use wn_core::errors::{DomainError, ValidationError, VerificationError};
use wn_shared::errors::{error_codes, ErrorResponse};

fn status_and_body(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::ValidationErr(validation) => {
            let code = match validation {
                ValidationError::InvalidEmail => error_codes::EMAIL_INVALID,
                _ => error_codes::VALIDATION_ERROR,
            };
            (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(code, validation.to_string()),
            )
        }
        DomainError::Verification(verification) => match verification {
            VerificationError::NoPendingVerification => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(error_codes::VERIFICATION_NOT_FOUND, verification.to_string()),
            ),
            VerificationError::CodeExpired => (
                StatusCode::GONE,
                ErrorResponse::new(
                    error_codes::VERIFICATION_CODE_EXPIRED,
                    verification.to_string(),
                ),
            ),
            VerificationError::AttemptsExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(
                    error_codes::VERIFICATION_ATTEMPTS_EXCEEDED,
                    verification.to_string(),
                ),
            ),
            VerificationError::CodeMismatch { remaining_attempts } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    error_codes::VERIFICATION_CODE_INVALID,
                    verification.to_string(),
                )
                .add_detail("remainingAttempts", remaining_attempts),
            ),
        },
        DomainError::NotFound { resource } if resource == "subscriber" => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::SUBSCRIBER_NOT_FOUND, "Subscriber not found"),
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        ),
        // Storage details stay in the logs
        DomainError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(
                error_codes::STORAGE_ERROR,
                "A storage error occurred. Please try again later",
            ),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let (status, body) = status_and_body(error);

    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    let mut builder = HttpResponse::build(status);
    // Mismatch bodies also carry the counter at the top level for clients
    if let DomainError::Verification(VerificationError::CodeMismatch { remaining_attempts }) = error {
        let mut value = serde_json::to_value(&body).unwrap_or_default();
        if let Some(object) = value.as_object_mut() {
            object.insert("remainingAttempts".to_string(), (*remaining_attempts).into());
        }
        return builder.json(value);
    }
    builder.json(body)
}

/// 400 response listing the fields that failed DTO validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    tracing::debug!(fields = ?fields, "Request validation failed");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

/// Malformed JSON bodies get the standard error envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::BAD_REQUEST, message));
    InternalError::from_response(err, response).into()
}

/// Malformed query strings get the standard error envelope
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::BAD_REQUEST, message));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode, &str)> = vec![
            (
                ValidationError::InvalidEmail.into(),
                StatusCode::BAD_REQUEST,
                error_codes::EMAIL_INVALID,
            ),
            (
                VerificationError::NoPendingVerification.into(),
                StatusCode::NOT_FOUND,
                error_codes::VERIFICATION_NOT_FOUND,
            ),
            (
                VerificationError::CodeExpired.into(),
                StatusCode::GONE,
                error_codes::VERIFICATION_CODE_EXPIRED,
            ),
            (
                VerificationError::AttemptsExceeded.into(),
                StatusCode::TOO_MANY_REQUESTS,
                error_codes::VERIFICATION_ATTEMPTS_EXCEEDED,
            ),
            (
                VerificationError::CodeMismatch { remaining_attempts: 1 }.into(),
                StatusCode::BAD_REQUEST,
                error_codes::VERIFICATION_CODE_INVALID,
            ),
            (
                DomainError::storage("deadlock"),
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::STORAGE_ERROR,
            ),
            (
                DomainError::NotFound {
                    resource: "subscriber".to_string(),
                },
                StatusCode::NOT_FOUND,
                error_codes::SUBSCRIBER_NOT_FOUND,
            ),
        ];

        for (error, status, code) in cases {
            let (actual_status, body) = status_and_body(&error);
            assert_eq!(actual_status, status, "{:?}", error);
            assert_eq!(body.error, code);
            assert!(!body.success);
        }
    }

    #[test]
    fn test_storage_message_is_generic() {
        let (_, body) = status_and_body(&DomainError::storage("password=hunter2"));
        assert!(!body.message.contains("hunter2"));
    }
}
