//! HTTP routes for the metrics simulator.
//!
//! Defines the Axum router and application state.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::{routing::get, Router};
use prometheus::Registry;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::handlers;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Metric registry shared with the traffic generator.
    pub registry: Arc<Registry>,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/metrics` - Prometheus text exposition of the shared registry
/// - `/health` - fixed liveness payload
/// - anything else, unknown path or non-GET method, is a plain 404 with an
///   empty body (the per-route fallback overrides axum's default 405)
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/metrics", get(handlers::metrics_handler).fallback(not_found))
        .route("/health", get(handlers::health_check).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

/// The scrape surface is two GET routes; everything else is 404.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
