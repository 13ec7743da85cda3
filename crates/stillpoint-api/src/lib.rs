//! Stillpoint: HTTP API.
//!
//! Exposes the content, volunteering and feedback contexts over a JSON API.
//! Callers identify themselves through headers set by the upstream auth
//! proxy (see [`extract`]).

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod telemetry;

/// Builds the full application router.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/content", routes::content::router())
        .nest("/api/v1/public/content", routes::content::public_router())
        .nest("/api/v1/volunteering", routes::volunteering::router())
        .nest("/api/v1/events", routes::events::router())
        .nest("/api/v1/feedback", routes::feedback::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
