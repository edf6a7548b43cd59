//! # safelink-service
//!
//! The link pipeline for SafeLink. Generation runs
//! validator → hasher → codec → composer; landing runs
//! codec → validator → redirect gate.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time.

pub mod gate;
pub mod link;
pub mod validation;

pub use gate::{GatePhase, GateSession, RedirectGate};
pub use link::{GeneratedLink, LinkComposer, LinkService, PayloadCodec};
pub use validation::{UrlRejection, check_public_http_url, is_public_http_url};
