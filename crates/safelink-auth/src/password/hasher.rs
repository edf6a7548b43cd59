//! SHA-256 password digests for link gating.
//!
//! The digest is unsalted and single-round: the same secret always yields
//! the same 64-character value, which is what lets the generator embed it
//! in a link and the gate check it later without any server state. That
//! also means a digest can be looked up in precomputed tables, so this
//! only suits casual link gating, never account credentials. Changing the
//! scheme would invalidate every link already handed out.

use sha2::{Digest, Sha256};

use safelink_core::error::{AppError, ErrorKind};
use safelink_core::types::PasswordDigest;

/// Computes and checks link password digests.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Digest of `secret`, or `None` when no password is required.
    ///
    /// Empty and absent secrets both mean "no password".
    pub fn hash(&self, secret: Option<&str>) -> Option<PasswordDigest> {
        let secret = secret.filter(|s| !s.is_empty())?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(secret.as_bytes()));
        Some(PasswordDigest::from_bytes(&bytes))
    }

    /// Computes the digest on the blocking pool.
    ///
    /// The only failure is the blocking task itself dying, reported as a
    /// recoverable [`ErrorKind::HashComputation`].
    pub async fn hash_async(&self, secret: String) -> Result<Option<PasswordDigest>, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(Some(&secret)))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password digest task failed");
                AppError::with_source(
                    ErrorKind::HashComputation,
                    "Error verifying password. Please try again.",
                    e,
                )
            })
    }

    /// Whether `secret` hashes to `expected`. An empty secret never matches.
    pub fn verify(&self, secret: &str, expected: &PasswordDigest) -> bool {
        self.hash(Some(secret))
            .is_some_and(|digest| digest.matches(expected))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash(Some("secret1")).expect("digest");
        let second = hasher.hash(Some("secret1")).expect("digest");
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
        assert!(
            first
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_empty_and_absent_mean_no_password() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.hash(Some("")), None);
        assert_eq!(hasher.hash(None), None);
    }

    #[test]
    fn test_known_vector() {
        let digest = PasswordHasher::new().hash(Some("abc")).expect("digest");
        assert_eq!(
            digest.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash(Some("hunter2")).expect("digest");
        assert!(hasher.verify("hunter2", &digest));
        assert!(!hasher.verify("wrong", &digest));
        assert!(!hasher.verify("", &digest));
    }

    #[tokio::test]
    async fn test_hash_async_matches_sync() {
        let hasher = PasswordHasher::new();
        let digest = hasher
            .hash_async("hunter2".to_string())
            .await
            .expect("task ok");
        assert_eq!(digest, hasher.hash(Some("hunter2")));
    }
}
