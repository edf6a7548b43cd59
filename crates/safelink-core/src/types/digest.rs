//! Password digest value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a hex-rendered SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A password check value embedded in a link.
///
/// Always 64 lowercase hex characters. Construction goes through
/// [`PasswordDigest::from_str`] (or the `TryFrom<String>` used by serde),
/// so a value of this type is well-formed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordDigest(String);

/// Returned when a string is not a well-formed digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password digest must be 64 lowercase hex characters")]
pub struct InvalidDigest;

impl PasswordDigest {
    /// Render a raw 256-bit digest as lowercase hex.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Borrow the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-shape comparison against another digest.
    ///
    /// Both sides are fixed-length, so the loop always visits every byte.
    pub fn matches(&self, other: &PasswordDigest) -> bool {
        self.0
            .bytes()
            .zip(other.0.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl FromStr for PasswordDigest {
    type Err = InvalidDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidDigest)
        }
    }
}

impl TryFrom<String> for PasswordDigest {
    type Error = InvalidDigest;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PasswordDigest> for String {
    fn from(digest: PasswordDigest) -> Self {
        digest.0
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7";

    #[test]
    fn test_parse_valid_digest() {
        let digest: PasswordDigest = SAMPLE.parse().expect("should parse");
        assert_eq!(digest.as_str(), SAMPLE);
    }

    #[test]
    fn test_rejects_uppercase_and_wrong_length() {
        assert!(SAMPLE.to_uppercase().parse::<PasswordDigest>().is_err());
        assert!(SAMPLE[..63].parse::<PasswordDigest>().is_err());
        assert!("".parse::<PasswordDigest>().is_err());
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let bad: Result<PasswordDigest, _> = serde_json::from_str("\"not-a-digest\"");
        assert!(bad.is_err());
        let good: PasswordDigest = serde_json::from_str(&format!("\"{SAMPLE}\"")).expect("ok");
        assert_eq!(serde_json::to_string(&good).expect("ser"), format!("\"{SAMPLE}\""));
    }

    #[test]
    fn test_from_bytes_renders_lowercase_hex() {
        let digest = PasswordDigest::from_bytes(&[0xab; 32]);
        assert_eq!(digest.as_str(), "ab".repeat(32));
        assert!(digest.as_str().parse::<PasswordDigest>().is_ok());
    }

    #[test]
    fn test_matches() {
        let a: PasswordDigest = SAMPLE.parse().unwrap();
        let b: PasswordDigest = "0".repeat(64).parse().unwrap();
        assert!(a.matches(&a.clone()));
        assert!(!a.matches(&b));
    }
}
