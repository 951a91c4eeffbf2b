//! Simulator error types.
//!
//! Only two fallible regions exist: metric registration/encoding and the
//! generation cycle. Registration errors abort startup; cycle errors are
//! recovered in the generation loop; render errors map to a 500 via the
//! `IntoResponse` impl. Everything else on the HTTP surface is a plain 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Metrics simulator error type.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Distribution error: {0}")]
    Distribution(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for SimError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            SimError::Metrics(err) => {
                // Log the actual error server-side, return a generic message
                tracing::error!(target: "sim.metrics", error = %err, "Metric operation failed");
                ("METRICS_ERROR", "Failed to render metrics".to_string())
            }
            SimError::Distribution(reason) => {
                tracing::error!(target: "sim.generator", error = %reason, "Generation failed");
                ("GENERATION_ERROR", "Metric generation failed".to_string())
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
