//! Destination URL validation.

pub mod validator;

pub use validator::{UrlRejection, check_public_http_url, is_public_http_url};
