//! Redirect gate configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Landing-side gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Countdown length before the gate unlocks, in seconds.
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u64,
    /// External resource opened by the verification step.
    #[serde(default = "default_verification_url")]
    pub verification_url: String,
    /// Query parameter names that may carry the token, in priority order.
    #[serde(default = "default_accepted_params")]
    pub accepted_params: Vec<String>,
}

impl GateConfig {
    /// Countdown length as a [`Duration`].
    pub fn countdown(&self) -> Duration {
        Duration::from_secs(self.countdown_seconds)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: default_countdown_seconds(),
            verification_url: default_verification_url(),
            accepted_params: default_accepted_params(),
        }
    }
}

fn default_countdown_seconds() -> u64 {
    5
}

fn default_verification_url() -> String {
    "https://offensivefountainrabbit.com/a90dwxa6?key=702e03348d76e695e837465455e9e37b".to_string()
}

fn default_accepted_params() -> Vec<String> {
    ["url", "go", "link", "to", "redirect", "s", "d"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}
