//! CORS middleware configuration for cross-origin requests.
//!
//! The newsletter form is embedded in the WorkNow web frontend, so browsers
//! call these endpoints cross-origin. Origins come from `CorsConfig`; an empty
//! list or `*` allows any origin (development).

use actix_cors::Cors;
use actix_web::http::{header, Method};
use wn_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| match m.to_uppercase().parse::<Method>() {
            Ok(method) => Some(method),
            Err(_) => {
                tracing::warn!(method = %m, "Ignoring invalid CORS method");
                None
            }
        })
        .collect();

    let mut cors = Cors::default()
        .allowed_methods(methods)
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring CORS to allow any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|s| s.trim()) {
            if !origin.is_empty() {
                tracing::info!(origin = %origin, "Adding allowed origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if config.allow_credentials && !config.allows_any_origin() {
        cors = cors.supports_credentials();
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let config = CorsConfig {
            allowed_origins: vec!["https://worknow.co.il".to_string()],
            ..CorsConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://worknow.co.il"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://worknow.co.il"
        );
    }

    #[actix_web::test]
    async fn test_development_config_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&CorsConfig::development()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
