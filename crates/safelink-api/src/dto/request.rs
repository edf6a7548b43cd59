//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Link generation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateLinkRequest {
    /// Destination URL.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    /// Optional password.
    #[serde(default)]
    pub password: Option<String>,
    /// Query parameter name for the token.
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "Parameter name must be 1-32 characters"))]
    pub param_name: Option<String>,
}

impl From<GenerateLinkRequest> for safelink_service::link::GenerateLinkRequest {
    fn from(req: GenerateLinkRequest) -> Self {
        Self {
            url: req.url,
            password: req.password,
            param_name: req.param_name,
        }
    }
}

/// Unlock request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnlockLinkRequest {
    /// Encoded token from the link.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// Password attempt.
    #[serde(default)]
    pub password: String,
}

/// URL check request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateUrlRequest {
    /// Candidate destination.
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_validation() {
        let req: GenerateLinkRequest =
            serde_json::from_str(r#"{"url":"https://example.com/page"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: GenerateLinkRequest =
            serde_json::from_str(r#"{"url":"","param_name":""}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
        assert!(errors.field_errors().contains_key("param_name"));
    }
}
