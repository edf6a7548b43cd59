//! Public http(s) destination checks.
//!
//! Rules run in a fixed order and stop at the first failure, so the
//! rejection reported is always the earliest one that applies.

use serde::Serialize;
use thiserror::Error;
use url::Url;

use safelink_core::error::AppError;

/// Shortest candidate worth parsing.
pub const MIN_URL_LEN: usize = 10;

/// Shortest acceptable host.
const MIN_HOST_LEN: usize = 3;

/// Hosts that point back at the visitor's own machine.
const PRIVATE_HOST_PREFIXES: [&str; 4] = ["localhost", "127.0.0.1", "0.0.0.0", "::1"];

/// Why a candidate destination was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlRejection {
    /// Nothing but whitespace.
    #[error("URL cannot be empty")]
    Empty,
    /// Fewer than [`MIN_URL_LEN`] characters.
    #[error("URL too short. Please enter a valid URL")]
    TooShort,
    /// Not an http or https URL.
    #[error("URL must start with http:// or https://")]
    BadScheme,
    /// The URL parser refused it.
    #[error("Invalid URL format. Please check your URL")]
    Unparseable,
    /// Host missing, too short, or without a dot.
    #[error("Invalid hostname. Please check your URL")]
    BadHost,
    /// Loopback or unspecified address.
    #[error("Local URLs cannot be used for public SafeLinks")]
    PrivateHost,
    /// Rightmost host label is not an alphabetic TLD.
    #[error("Invalid domain extension. Please check your URL")]
    BadTld,
}

impl UrlRejection {
    /// Stable reason code for API and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort => "too-short",
            Self::BadScheme => "bad-scheme",
            Self::Unparseable => "unparseable",
            Self::BadHost => "bad-host",
            Self::PrivateHost => "private-host",
            Self::BadTld => "bad-tld",
        }
    }
}

impl From<UrlRejection> for AppError {
    fn from(rejection: UrlRejection) -> Self {
        AppError::validation(rejection.to_string())
    }
}

/// Whether `candidate` is an acceptable public http(s) destination.
pub fn is_public_http_url(candidate: &str) -> bool {
    check_public_http_url(candidate).is_ok()
}

/// Check `candidate` and return the parsed URL, or the first rule it breaks.
pub fn check_public_http_url(candidate: &str) -> Result<Url, UrlRejection> {
    let candidate = candidate.trim();

    if candidate.is_empty() {
        return Err(UrlRejection::Empty);
    }

    if candidate.chars().count() < MIN_URL_LEN {
        return Err(UrlRejection::TooShort);
    }

    if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
        return Err(UrlRejection::BadScheme);
    }

    let parsed = Url::parse(candidate).map_err(|_| UrlRejection::Unparseable)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlRejection::BadScheme);
    }

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();

    if host.len() < MIN_HOST_LEN || !host.contains('.') {
        return Err(UrlRejection::BadHost);
    }

    if PRIVATE_HOST_PREFIXES
        .iter()
        .any(|prefix| host == *prefix || host.starts_with(prefix))
    {
        return Err(UrlRejection::PrivateHost);
    }

    let tld = host.rsplit('.').next().unwrap_or_default();
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(UrlRejection::BadTld);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_candidates() {
        let cases = [
            ("", UrlRejection::Empty),
            ("   ", UrlRejection::Empty),
            ("short", UrlRejection::TooShort),
            ("ftp://example.com/x", UrlRejection::BadScheme),
            ("http://localhost/x", UrlRejection::BadHost),
            ("http://127.0.0.1/x", UrlRejection::PrivateHost),
            ("http://abc", UrlRejection::BadHost),
            ("http://ab.c1", UrlRejection::BadTld),
        ];

        for (candidate, expected) in cases {
            assert_eq!(
                check_public_http_url(candidate).err(),
                Some(expected),
                "candidate {candidate:?}"
            );
            assert!(!is_public_http_url(candidate));
        }
    }

    #[test]
    fn test_accepts_public_urls() {
        assert!(is_public_http_url("https://example.com/page"));
        assert!(is_public_http_url("http://sub.example.co"));
        assert!(is_public_http_url("  https://example.com/page  "));
    }

    #[test]
    fn test_private_prefix_matches_subdomain_style_hosts() {
        assert_eq!(
            check_public_http_url("http://localhost.example.com/"),
            Err(UrlRejection::PrivateHost)
        );
        assert_eq!(
            check_public_http_url("http://0.0.0.0:8080/admin"),
            Err(UrlRejection::PrivateHost)
        );
    }

    #[test]
    fn test_scheme_prefix_is_case_sensitive() {
        assert_eq!(
            check_public_http_url("HTTPS://example.com/page"),
            Err(UrlRejection::BadScheme)
        );
    }

    #[test]
    fn test_rejects_script_urls() {
        assert_eq!(
            check_public_http_url("javascript:alert(1)"),
            Err(UrlRejection::BadScheme)
        );
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(
            check_public_http_url("http://exa mple.com/"),
            Err(UrlRejection::Unparseable)
        );
    }

    #[test]
    fn test_trailing_dot_has_empty_tld() {
        assert_eq!(
            check_public_http_url("https://example.com./"),
            Err(UrlRejection::BadTld)
        );
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(UrlRejection::PrivateHost.code(), "private-host");
        assert_eq!(
            serde_json::to_string(&UrlRejection::BadTld).expect("serialize"),
            "\"bad-tld\""
        );
    }
}
