//! Link service: generate, inspect, and unlock links.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use safelink_auth::password::PasswordHasher;
use safelink_core::config::LinkConfig;
use safelink_core::error::AppError;
use safelink_core::types::LinkPayload;

use super::codec::{DecodeTier, PayloadCodec};
use super::composer::{GeneratedLink, LinkComposer};
use super::shortener::shortener_handoff_url;
use crate::validation::check_public_http_url;

/// Request to generate a new link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLinkRequest {
    /// Destination URL.
    pub url: String,
    /// Password guarding the link (optional).
    pub password: Option<String>,
    /// Query parameter name; the configured default when absent.
    pub param_name: Option<String>,
}

/// What a token reveals without its password.
#[derive(Debug, Clone, Serialize)]
pub struct LinkInspection {
    /// Destination, only when no password guards it.
    pub target_url: Option<String>,
    /// Whether a password is required.
    pub password_required: bool,
    /// Decoding tier that read the token.
    pub tier: DecodeTier,
}

/// Generates links and reads them back.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Link configuration.
    config: LinkConfig,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Payload codec.
    codec: PayloadCodec,
    /// Link composer.
    composer: LinkComposer,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(config: LinkConfig, hasher: Arc<PasswordHasher>) -> Self {
        let composer = LinkComposer::new(&config);
        Self {
            config,
            hasher,
            codec: PayloadCodec::new(),
            composer,
        }
    }

    /// Link configuration in use.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Generates a shareable link for `req.url`.
    pub async fn generate(&self, req: GenerateLinkRequest) -> Result<GeneratedLink, AppError> {
        let url = req.url.trim();
        check_public_http_url(url)?;

        let password = req
            .password
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let password_hash = self.hasher.hash_async(password).await?;
        let password_protected = password_hash.is_some();

        let payload = LinkPayload {
            url: url.to_string(),
            password_hash,
        };
        let token = self.codec.encode(&payload)?;

        let param_name = req
            .param_name
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(self.config.default_param.as_str());

        let generated = self
            .composer
            .report(url, param_name, &token, password_protected);

        info!(
            param = %param_name,
            token_length = generated.token_length,
            compression_percent = generated.compression_percent,
            password_protected,
            "Link generated"
        );

        Ok(generated)
    }

    /// Decodes `token` and checks its destination.
    ///
    /// The destination stays hidden when a password guards it.
    pub fn inspect(&self, token: &str) -> Result<LinkInspection, AppError> {
        let (payload, tier) = self.open_token(token)?;
        let password_required = payload.is_password_protected();

        Ok(LinkInspection {
            target_url: (!password_required).then_some(payload.url),
            password_required,
            tier,
        })
    }

    /// Returns the destination of `token` once `password` checks out.
    ///
    /// Links without a password unlock with any input.
    pub async fn unlock(&self, token: &str, password: &str) -> Result<String, AppError> {
        let (payload, _) = self.open_token(token)?;

        let Some(expected) = payload.password_hash else {
            return Ok(payload.url);
        };

        if password.is_empty() {
            return Err(AppError::validation("Please enter a password"));
        }

        let matched = self
            .hasher
            .hash_async(password.to_string())
            .await?
            .is_some_and(|digest| digest.matches(&expected));

        if !matched {
            info!("Link unlock refused");
            return Err(AppError::password_mismatch(
                "Incorrect password! Please try again.",
            ));
        }

        info!("Link unlocked");
        Ok(payload.url)
    }

    /// Shortener page with `link` pre-filled.
    pub fn shortener_url(&self, link: &str) -> String {
        shortener_handoff_url(&self.config.shortener_url, link)
    }

    fn open_token(&self, token: &str) -> Result<(LinkPayload, DecodeTier), AppError> {
        let decoded = self.codec.decode(token.trim())?;
        check_public_http_url(&decoded.payload.url)?;
        Ok((decoded.payload, decoded.tier))
    }
}

#[cfg(test)]
mod tests {
    use safelink_core::error::ErrorKind;

    use super::*;

    fn service() -> LinkService {
        LinkService::new(LinkConfig::default(), Arc::new(PasswordHasher::new()))
    }

    fn request(url: &str, password: Option<&str>) -> GenerateLinkRequest {
        GenerateLinkRequest {
            url: url.to_string(),
            password: password.map(str::to_string),
            param_name: None,
        }
    }

    #[tokio::test]
    async fn test_generate_open_link() {
        let svc = service();
        let link = svc
            .generate(request("https://example.com/page", None))
            .await
            .expect("generate");

        assert!(link.link.starts_with(
            "https://safelinkurl.wahyu-blogger.site/safelink.html?url="
        ));
        assert!(!link.password_protected);

        let inspection = svc.inspect(&link.token).expect("inspect");
        assert_eq!(
            inspection.target_url.as_deref(),
            Some("https://example.com/page")
        );
        assert!(!inspection.password_required);
        assert_eq!(inspection.tier, DecodeTier::Structured);
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_url() {
        let err = service()
            .generate(request("http://localhost/x", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_custom_param_name() {
        let mut req = request("https://example.com/page", None);
        req.param_name = Some("go".to_string());
        let link = service().generate(req).await.expect("generate");
        assert!(link.link.contains("/safelink.html?go="));
        assert_eq!(link.param_name, "go");
    }

    #[tokio::test]
    async fn test_blank_password_means_open_link() {
        let link = service()
            .generate(request("https://example.com/page", Some("   ")))
            .await
            .expect("generate");
        assert!(!link.password_protected);
    }

    #[tokio::test]
    async fn test_protected_link_hides_target_until_unlocked() {
        let svc = service();
        let link = svc
            .generate(request("https://example.com/private", Some("hunter2")))
            .await
            .expect("generate");
        assert!(link.password_protected);

        let inspection = svc.inspect(&link.token).expect("inspect");
        assert!(inspection.password_required);
        assert_eq!(inspection.target_url, None);

        let err = svc.unlock(&link.token, "wrong").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PasswordMismatch);

        let err = svc.unlock(&link.token, "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let target = svc.unlock(&link.token, "hunter2").await.expect("unlock");
        assert_eq!(target, "https://example.com/private");
    }

    #[test]
    fn test_inspect_rejects_unsafe_target() {
        let token = PayloadCodec::new()
            .encode(&LinkPayload::open("javascript:alert(1)"))
            .expect("encode");
        let err = service().inspect(token.as_str()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_inspect_corrupt_token() {
        let err = service().inspect("!!!").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_shortener_url() {
        assert_eq!(
            service().shortener_url("https://x.example/"),
            "https://tinyurl.com/create.php?url=https%3A%2F%2Fx.example%2F"
        );
    }
}
