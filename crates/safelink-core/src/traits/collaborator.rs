//! Narrow interfaces to the outside world used by the redirect gate and
//! the generator.
//!
//! Implementations report only success or failure; the gate never needs
//! to know what the external resource contains.

use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Opens the external verification resource in a fresh browsing context
/// that holds no reference back to the gate.
pub trait VerificationOpener: std::fmt::Debug {
    /// Open `url`. An error means the open was blocked or failed.
    fn open(&self, url: &str) -> AppResult<()>;
}

/// How the final navigation should treat the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Replace the current history entry (the gate was reached via a referrer).
    Replace,
    /// Normal navigation that adds a history entry.
    Push,
}

/// Performs the final navigation to the destination.
pub trait Navigator: std::fmt::Debug {
    /// Navigate to `url`.
    fn navigate(&self, url: &str, mode: NavigationMode) -> AppResult<()>;
}

/// Write-only text clipboard.
pub trait Clipboard: std::fmt::Debug {
    /// Copy `text`. Callers treat failure as a secondary notice only.
    fn copy(&self, text: &str) -> AppResult<()>;
}
