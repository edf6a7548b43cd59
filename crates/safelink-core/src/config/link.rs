//! Link generation configuration.

use serde::{Deserialize, Serialize};

/// Settings used when composing shareable links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Base address the landing page is served from, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Landing page path appended to `base_url`.
    #[serde(default = "default_landing_page")]
    pub landing_page: String,
    /// Query parameter name used when the caller does not pick one.
    #[serde(default = "default_param")]
    pub default_param: String,
    /// Link-shortening service the generated link is handed to.
    #[serde(default = "default_shortener_url")]
    pub shortener_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            landing_page: default_landing_page(),
            default_param: default_param(),
            shortener_url: default_shortener_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://safelinkurl.wahyu-blogger.site".to_string()
}

fn default_landing_page() -> String {
    "safelink.html".to_string()
}

fn default_param() -> String {
    "url".to_string()
}

fn default_shortener_url() -> String {
    "https://tinyurl.com/create.php".to_string()
}
