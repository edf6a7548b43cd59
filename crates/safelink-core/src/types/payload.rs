//! The structured payload carried inside a link token.

use serde::{Deserialize, Serialize};

use super::digest::PasswordDigest;

/// Destination plus optional password check value.
///
/// Serialized as `{"url": "...", "pwd": "<hex>" | null}`; the `pwd` key is
/// part of the link wire format and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPayload {
    /// Destination URL.
    pub url: String,
    /// Digest of the password guarding the link, if any.
    #[serde(rename = "pwd", default)]
    pub password_hash: Option<PasswordDigest>,
}

impl LinkPayload {
    /// Payload without password protection.
    pub fn open(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            password_hash: None,
        }
    }

    /// Payload guarded by a password digest.
    pub fn protected(url: impl Into<String>, digest: PasswordDigest) -> Self {
        Self {
            url: url.into(),
            password_hash: Some(digest),
        }
    }

    /// Whether a password must be entered before redirecting.
    pub fn is_password_protected(&self) -> bool {
        self.password_hash.is_some()
    }
}
