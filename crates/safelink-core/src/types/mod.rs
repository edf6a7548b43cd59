//! Core type definitions used across the SafeLink workspace.

pub mod digest;
pub mod payload;
pub mod token;

pub use digest::{InvalidDigest, PasswordDigest};
pub use payload::LinkPayload;
pub use token::EncodedToken;
