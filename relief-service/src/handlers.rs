//! HTTP request handlers for the elevation window service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use relief::{ReliefError, WindowRequest};

use crate::AppState;

fn default_stride() -> usize {
    1
}

/// Query parameters for the window endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct WindowQuery {
    /// Window origin column, in raster-sample coordinates.
    pub x: usize,
    /// Window origin row, in raster-sample coordinates.
    pub z: usize,
    /// Window width in samples, before subsampling.
    pub width: usize,
    /// Window height in samples, before subsampling.
    pub height: usize,
    /// Take every stride-th sample along each axis. Default is 1.
    #[serde(default = "default_stride")]
    pub stride: usize,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Render a flattened sample grid as the wire format the terrain client
/// expects: a bracketed, comma-space-separated list of decimal integers.
pub fn format_samples(samples: &[i16]) -> String {
    let mut out = String::with_capacity(samples.len() * 8 + 2);
    out.push('[');
    for (i, sample) in samples.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{}", sample);
    }
    out.push(']');
    out
}

/// Read a window of a dataset's marked raster.
///
/// Returns the flattened row-major sample grid as a bracketed decimal
/// list, e.g. `[1, 2, 3, 4]`.
#[utoipa::path(
    get,
    path = "/dem/{dataset}",
    params(
        ("dataset" = String, Path, description = "Dataset route name, e.g. mola"),
        WindowQuery
    ),
    responses(
        (status = 200, description = "Flattened sample grid", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid or out-of-range window", body = ErrorResponse),
        (status = 404, description = "Unknown dataset or missing raster", body = ErrorResponse),
        (status = 500, description = "Raster decode failure", body = ErrorResponse)
    ),
    tag = "elevation"
)]
pub async fn get_window(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
    Query(query): Query<WindowQuery>,
) -> impl IntoResponse {
    tracing::debug!(
        dataset = %dataset,
        x = query.x,
        z = query.z,
        width = query.width,
        height = query.height,
        stride = query.stride,
        "Window query"
    );

    let Some(dataset) = state.dataset(&dataset) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("unknown dataset: {}", dataset),
            }),
        )
            .into_response();
    };

    let request = WindowRequest {
        x: query.x,
        z: query.z,
        width: query.width,
        height: query.height,
        stride: query.stride,
    };

    match dataset.read_window(&request) {
        Ok(window) => {
            tracing::info!(
                dataset = %dataset.config().name,
                rows = window.height(),
                columns = window.width(),
                "Window served"
            );
            (StatusCode::OK, format_samples(window.samples())).into_response()
        }
        Err(e) => error_response(&dataset.config().name, e),
    }
}

/// Create an error response for window queries.
fn error_response(dataset: &str, e: ReliefError) -> axum::response::Response {
    let (status, message) = match &e {
        ReliefError::InvalidQuery { .. } | ReliefError::OutOfRange { .. } => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        ReliefError::FileNotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    tracing::warn!(dataset = %dataset, error = %e, "Window query failed");

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// List the celestial bodies whose source raster is present.
///
/// Returns a comma-joined list of body names, e.g. `Mars,Moon,Mercury`.
#[utoipa::path(
    get,
    path = "/available",
    responses(
        (status = 200, description = "Comma-joined body names", body = String, content_type = "text/plain")
    ),
    tag = "elevation"
)]
pub async fn get_available(State(state): State<Arc<AppState>>) -> String {
    state
        .datasets
        .iter()
        .filter(|d| d.is_available())
        .map(|d| d.config().body.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
