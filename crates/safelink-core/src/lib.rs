//! # safelink-core
//!
//! Core crate for SafeLink. Contains configuration schemas, the link
//! payload and digest types, the collaborator traits the redirect gate
//! talks through, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SafeLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
