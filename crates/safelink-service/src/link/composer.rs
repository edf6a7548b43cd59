//! Shareable link composition.

use serde::{Deserialize, Serialize};

use safelink_core::config::LinkConfig;
use safelink_core::types::EncodedToken;

/// A generated link with the numbers the generator page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedLink {
    /// Full shareable link.
    pub link: String,
    /// The token embedded in the link.
    pub token: String,
    /// Query parameter carrying the token.
    pub param_name: String,
    /// Length of the destination URL.
    pub original_length: usize,
    /// Length of the token.
    pub token_length: usize,
    /// Size saving in percent; negative when the token is longer.
    pub compression_percent: i64,
    /// Whether a password guards the link.
    pub password_protected: bool,
}

/// Joins base address, landing page, parameter name, and token.
#[derive(Debug, Clone)]
pub struct LinkComposer {
    base_url: String,
    landing_page: String,
}

impl LinkComposer {
    /// Creates a composer from link configuration.
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            landing_page: config.landing_page.clone(),
        }
    }

    /// `{base}/{landing_page}?{param_name}={token}`.
    ///
    /// `param_name` is used verbatim.
    pub fn compose(&self, param_name: &str, token: &EncodedToken) -> String {
        format!(
            "{}/{}?{}={}",
            self.base_url, self.landing_page, param_name, token
        )
    }

    /// Compose the link and collect the generator report.
    pub fn report(
        &self,
        original_url: &str,
        param_name: &str,
        token: &EncodedToken,
        password_protected: bool,
    ) -> GeneratedLink {
        GeneratedLink {
            link: self.compose(param_name, token),
            token: token.as_str().to_string(),
            param_name: param_name.to_string(),
            original_length: original_url.encode_utf16().count(),
            token_length: token.utf16_len(),
            compression_percent: compression_ratio(original_url, token),
            password_protected,
        }
    }
}

/// `round(100 * (1 - len(token) / len(original_url)))`.
///
/// Lengths are UTF-16 code units and halves round toward positive
/// infinity, matching what browsers display. Short URLs give negative
/// values; callers show them as-is.
pub fn compression_ratio(original_url: &str, token: &EncodedToken) -> i64 {
    let original = original_url.encode_utf16().count();
    if original == 0 {
        return 0;
    }
    let saving = (1.0 - token.utf16_len() as f64 / original as f64) * 100.0;
    (saving + 0.5).floor() as i64
}
