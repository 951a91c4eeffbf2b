//! Prometheus metrics endpoint handler.
//!
//! This endpoint is unauthenticated so the collection layer can scrape it.
//! Only synthetic operational data with catalog-bounded label cardinality
//! is exposed.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::errors::SimError;
use crate::observability::{render, CONTENT_TYPE_TEXT};
use crate::routes::AppState;

/// Handler for GET /metrics.
///
/// Renders the shared registry in the Prometheus text exposition format.
/// A scrape may interleave with an in-progress generation batch; metric
/// cells are atomic, so no read observes a torn increment.
///
/// # Errors
///
/// Text-encoding failures map to a 500 via [`SimError`].
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<Response, SimError> {
    let body = render(&state.registry)?;
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE_TEXT)], body).into_response())
}
