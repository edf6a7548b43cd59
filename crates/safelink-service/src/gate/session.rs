//! Per-page-load gate state.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use safelink_core::error::AppError;
use safelink_core::types::PasswordDigest;

use super::countdown::Countdown;

/// Where a session is in the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    /// Token not read yet.
    AwaitingDecode,
    /// Countdown running.
    Counting,
    /// Countdown over, password required.
    AwaitingPassword,
    /// Waiting for the user to open the verification resource.
    AwaitingVerification,
    /// Everything satisfied; the redirect may run.
    ReadyToRedirect,
    /// Navigated away. Terminal.
    Redirected,
    /// The link could not be opened. Terminal.
    Failed,
}

impl GatePhase {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redirected | Self::Failed)
    }
}

impl fmt::Display for GatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingDecode => write!(f, "awaiting_decode"),
            Self::Counting => write!(f, "counting"),
            Self::AwaitingPassword => write!(f, "awaiting_password"),
            Self::AwaitingVerification => write!(f, "awaiting_verification"),
            Self::ReadyToRedirect => write!(f, "ready_to_redirect"),
            Self::Redirected => write!(f, "redirected"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Why a session ended in [`GatePhase::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateFailure {
    /// No accepted query parameter carried a token.
    #[error("No encrypted URL provided. Please check your link.")]
    NoToken,
    /// The token could not be decoded.
    #[error("This link is invalid or corrupted. Please check your link.")]
    DecodeFailed,
    /// The decoded destination is not a public http(s) URL.
    #[error("Invalid target URL. This link cannot be opened.")]
    InvalidTarget,
}

impl From<GateFailure> for AppError {
    fn from(failure: GateFailure) -> Self {
        match failure {
            GateFailure::NoToken | GateFailure::DecodeFailed => {
                AppError::decode(failure.to_string())
            }
            GateFailure::InvalidTarget => AppError::validation(failure.to_string()),
        }
    }
}

/// Message shown to the visitor next to the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateNotice {
    /// Password submitted empty.
    EnterPassword,
    /// Password did not match.
    IncorrectPassword,
    /// The digest could not be computed.
    HashFailed,
    /// The verification resource did not open.
    AllowPopups,
    /// Redirect asked for with no destination.
    NoTarget,
    /// Redirect asked for before verification.
    NotVerified,
    /// Destination failed the final check.
    InvalidTarget,
    /// The navigator refused.
    NavigationFailed,
}

impl GateNotice {
    /// Text shown to the visitor.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EnterPassword => "Please enter a password",
            Self::IncorrectPassword => "Incorrect password! Please try again.",
            Self::HashFailed => "Error verifying password. Please try again.",
            Self::AllowPopups => {
                "Unable to open verification window. Please allow pop-ups for this site."
            }
            Self::NoTarget => "No target URL available",
            Self::NotVerified => "Please verify the link first by clicking \"Verify Link\"",
            Self::InvalidTarget => "Invalid target URL. Cannot redirect.",
            Self::NavigationFailed => "Error redirecting to target URL. Please try again.",
        }
    }
}

impl fmt::Display for GateNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// State of one visit to the landing page.
#[derive(Debug, Clone)]
pub struct GateSession {
    pub(crate) target_url: Option<String>,
    pub(crate) required_password_hash: Option<PasswordDigest>,
    pub(crate) verified: bool,
    pub(crate) phase: GatePhase,
    pub(crate) failure: Option<GateFailure>,
    pub(crate) notice: Option<GateNotice>,
    pub(crate) countdown: Option<Countdown>,
    pub(crate) has_referrer: bool,
    pub(crate) password_check_in_flight: bool,
    pub(crate) history: Vec<GatePhase>,
}

impl GateSession {
    pub(crate) fn new(has_referrer: bool) -> Self {
        Self {
            target_url: None,
            required_password_hash: None,
            verified: false,
            phase: GatePhase::AwaitingDecode,
            failure: None,
            notice: None,
            countdown: None,
            has_referrer,
            password_check_in_flight: false,
            history: vec![GatePhase::AwaitingDecode],
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Every phase entered so far, in order, starting with `AwaitingDecode`.
    pub fn history(&self) -> &[GatePhase] {
        &self.history
    }

    /// Decoded destination, if any.
    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_deref()
    }

    /// Whether the countdown will be followed by a password prompt.
    pub fn password_required(&self) -> bool {
        self.required_password_hash.is_some()
    }

    /// Whether the verification step succeeded.
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Why the session failed, once it has.
    pub fn failure(&self) -> Option<GateFailure> {
        self.failure
    }

    /// Current visitor notice.
    pub fn notice(&self) -> Option<GateNotice> {
        self.notice
    }

    /// Running or finished countdown.
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Whether the page was reached from another page.
    pub fn has_referrer(&self) -> bool {
        self.has_referrer
    }

    /// Whether a password digest is being computed.
    pub fn password_check_in_flight(&self) -> bool {
        self.password_check_in_flight
    }

    pub(crate) fn enter(&mut self, phase: GatePhase) {
        if self.phase != phase {
            tracing::debug!(from = %self.phase, to = %phase, "Gate transition");
            self.phase = phase;
            self.history.push(phase);
        }
    }

    pub(crate) fn fail(&mut self, failure: GateFailure) {
        tracing::info!(reason = ?failure, "Gate failed");
        self.failure = Some(failure);
        self.enter(GatePhase::Failed);
    }
}
