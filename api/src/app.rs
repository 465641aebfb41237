//! Application factory
//!
//! Builds the Actix-web application from a prepared [`AppState`] so the
//! server binary and the integration tests share one route table.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;
use wn_shared::config::CorsConfig;
use wn_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::{health_check, json_error_handler, query_error_handler};
use crate::middleware::cors::create_cors;
use crate::routes::newsletter::{self, AppState};

/// Create the application with all routes and middleware
pub fn create_app(
    app_state: web::Data<AppState>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // CORS runs inside the request span
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api").configure(newsletter::configure))
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
