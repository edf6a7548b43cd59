//! Results of gate transitions.

use serde::Serialize;

use safelink_core::error::AppError;
use safelink_core::traits::NavigationMode;
use safelink_core::types::PasswordDigest;

use super::session::GatePhase;

/// Result of a password submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordOutcome {
    /// Correct; the session moved on to verification.
    Accepted,
    /// Nothing entered. No hashing was done.
    Empty,
    /// Wrong password. The input should be cleared.
    Mismatch,
    /// A previous submission is still being checked.
    Busy,
    /// The digest could not be computed. Safe to retry.
    HashFailed,
    /// The session is not waiting for a password.
    NotExpected(GatePhase),
}

/// A password submission whose digest is still to be computed.
///
/// Returned by `begin_password_check`; hand the digest (or the error that
/// prevented it) to `complete_password_check`.
#[derive(Debug)]
pub struct PendingPasswordCheck {
    pub(crate) input: String,
}

impl PendingPasswordCheck {
    /// The submitted password, to be hashed off the caller's thread.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Take the submitted password.
    pub fn into_input(self) -> String {
        self.input
    }
}

/// Result of the verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// The resource was opened and the session is ready to redirect.
    Opened,
    /// Verification already happened; nothing was opened.
    AlreadyVerified,
    /// The opener failed. The session stays put.
    Blocked,
    /// The session is not at the verification step.
    NotReady(GatePhase),
}

/// Why a redirect did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectRefusal {
    /// No destination was decoded.
    NoTarget,
    /// The verification step has not succeeded.
    NotVerified,
    /// The destination no longer passes the URL checks.
    InvalidTarget,
    /// The navigator failed.
    NavigationFailed,
}

/// Result of a redirect request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectOutcome {
    /// Navigation happened with the given mode.
    Navigated(NavigationMode),
    /// A precondition was not met; the session stays put.
    Refused(RedirectRefusal),
    /// The session is not ready to redirect.
    NotReady(GatePhase),
}

/// Digest computation result handed back to the gate.
pub type DigestResult = Result<Option<PasswordDigest>, AppError>;
