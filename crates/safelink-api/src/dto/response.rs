//! Response DTOs.

use serde::{Deserialize, Serialize};

use safelink_service::link::GeneratedLink;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server state was built.
    pub uptime_seconds: i64,
}

/// Generated link plus the shortener hand-off address.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    /// The generated link report.
    #[serde(flatten)]
    pub link: GeneratedLink,
    /// Shortener page with the link pre-filled.
    pub shortener_url: String,
}

/// Result of an unlock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockResponse {
    /// The destination URL.
    pub target_url: String,
}

/// Result of a URL check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Whether the URL is acceptable.
    pub valid: bool,
    /// Reason code when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// User-facing message when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
