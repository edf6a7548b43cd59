//! Password digest computation.

pub mod hasher;

pub use hasher::PasswordHasher;
