//! Link generation, inspection, unlock, and URL check handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use safelink_core::error::AppError;
use safelink_service::gate::token_from_query;
use safelink_service::validation::check_public_http_url;

use crate::dto::request::{GenerateLinkRequest, UnlockLinkRequest, ValidateUrlRequest};
use crate::dto::response::{LinkResponse, UnlockResponse, ValidationResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/links
pub async fn generate_link(
    State(state): State<AppState>,
    Json(req): Json<GenerateLinkRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()?;

    let link = state.link_service.generate(req.into()).await?;
    let shortener_url = state.link_service.shortener_url(&link.link);
    let response = LinkResponse {
        link,
        shortener_url,
    };

    Ok(Json(serde_json::json!({ "success": true, "data": response })))
}

/// GET /api/links/inspect?url=<token>
///
/// Accepts the token under any of the gate's parameter names.
pub async fn inspect_link(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = token_from_query(&state.config.gate.accepted_params, &params).ok_or_else(|| {
        AppError::validation("No encrypted URL provided. Please check your link.")
    })?;

    let inspection = state.link_service.inspect(token)?;
    Ok(Json(serde_json::json!({ "success": true, "data": inspection })))
}

/// POST /api/links/unlock
pub async fn unlock_link(
    State(state): State<AppState>,
    Json(req): Json<UnlockLinkRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()?;

    let target_url = state
        .link_service
        .unlock(&req.token, &req.password)
        .await?;

    let response = UnlockResponse { target_url };
    Ok(Json(serde_json::json!({ "success": true, "data": response })))
}

/// POST /api/validate
pub async fn validate_url(
    Json(req): Json<ValidateUrlRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = match check_public_http_url(&req.url) {
        Ok(_) => ValidationResponse {
            valid: true,
            reason: None,
            message: None,
        },
        Err(rejection) => ValidationResponse {
            valid: false,
            reason: Some(rejection.code().to_string()),
            message: Some(rejection.to_string()),
        },
    };

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}
