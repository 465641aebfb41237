use actix_web::{web, HttpResponse};
use wn_shared::types::HealthResponse;

use crate::routes::newsletter::AppState;

/// GET /health
///
/// Returns 503 with status `degraded` when the storage backend does not answer.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let health = HealthResponse::healthy(
        "worknow-newsletter-api",
        env!("CARGO_PKG_VERSION"),
        state.infrastructure.storage_name(),
    );

    match state.infrastructure.check_storage().await {
        Ok(()) => HttpResponse::Ok().json(health),
        Err(e) => {
            tracing::error!(error = %e, "Storage health check failed");
            HttpResponse::ServiceUnavailable().json(health.degraded())
        }
    }
}
