//! Stillpoint API server entry point.

use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use stillpoint_api::config::Settings;
use stillpoint_api::error::AppError;
use stillpoint_api::state::AppState;
use stillpoint_api::{app, telemetry};
use stillpoint_core::clock::{Clock, SystemClock};
use stillpoint_store::{MemoryDocumentStore, PgDocumentStore};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    let telemetry = telemetry::init(&settings)?;

    tracing::info!("Starting Stillpoint API server");

    let result = serve(&settings).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server stopped with an error");
    }

    telemetry.shutdown();
    result
}

async fn serve(settings: &Settings) -> Result<(), AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let app_state = if let Some(database_url) = &settings.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(settings.database_max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("../../migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
        AppState::new(clock, PgDocumentStore::new(pool))
    } else {
        tracing::warn!("DATABASE_URL is not set; documents are kept in memory only");
        AppState::new(clock, MemoryDocumentStore::new())
    };

    let cors = match &settings.cors_allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| AppError::Config(format!("invalid CORS_ALLOWED_ORIGIN: {e}")))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        None => CorsLayer::permissive(),
    };

    let router = app(app_state).layer(cors);

    let addr = settings.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
