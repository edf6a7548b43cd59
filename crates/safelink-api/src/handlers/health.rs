//! Health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use safelink_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds().max(0),
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("No such endpoint").into()
}
