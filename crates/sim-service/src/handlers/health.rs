//! Health check handler.
//!
//! Liveness only: the simulator has no downstream dependencies to probe,
//! so being able to answer is the health signal.

use axum::http::header;
use axum::response::IntoResponse;

/// Fixed liveness payload. External probes compare the body byte-for-byte,
/// so it is served as a literal rather than a serialized struct.
pub const HEALTH_BODY: &str = r#"{"status": "healthy", "service": "metrics-simulator"}"#;

/// Handler for GET /health.
///
/// Always returns 200 with the fixed JSON body.
pub async fn health_check() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], HEALTH_BODY)
}
