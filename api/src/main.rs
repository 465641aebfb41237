use actix_web::{web, HttpServer};
use anyhow::Context;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use wn_api::{create_app, AppState};
use wn_core::services::VerificationServiceConfig;
use wn_shared::config::{AppConfig, LogFormat, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let builder = fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        "Starting WorkNow newsletter API"
    );

    let infrastructure = wn_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    let app_state = web::Data::new(AppState::new(
        infrastructure.clone(),
        VerificationServiceConfig::from(&config.verification),
    ));

    let bind_address = config.server.bind_address();
    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    tracing::info!(
        address = %bind_address,
        storage = infrastructure.storage_name(),
        "HTTP server listening"
    );

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    infrastructure.shutdown().await;
    Ok(())
}
