//! # safelink-auth
//!
//! Password gating for SafeLink links.
//!
//! ## Modules
//!
//! - `password`: SHA-256 password digest used to embed and check link passwords

pub mod password;

pub use password::PasswordHasher;
