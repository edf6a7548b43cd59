//! Link generation and decoding.

pub mod clipboard;
pub mod codec;
pub mod composer;
pub mod service;
pub mod shortener;

pub use clipboard::copy_with_notice;
pub use codec::{DecodeError, DecodeTier, DecodedPayload, PayloadCodec};
pub use composer::{GeneratedLink, LinkComposer};
pub use service::{GenerateLinkRequest, LinkInspection, LinkService};
pub use shortener::shortener_handoff_url;
