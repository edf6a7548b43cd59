//! Link payload codec.
//!
//! Tokens are the payload's JSON text compressed with LZ-string's
//! "encoded URI component" variant, so they only contain
//! `A-Z a-z 0-9 + - $` and never need percent-encoding.
//!
//! Decoding tries three tiers and commits to the first that succeeds
//! structurally:
//!
//! 1. structured: decompresses to a JSON object with a `url` string
//! 2. plain text: decompresses to anything else, which is taken as the URL
//! 3. legacy base64: does not decompress, but is base64 of at least
//!    [`LEGACY_MIN_LEN`] characters
//!
//! The codec never validates the URL it returns.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use safelink_core::error::AppError;
use safelink_core::result::AppResult;
use safelink_core::types::{EncodedToken, LinkPayload, PasswordDigest};

/// Characters an encoded token may contain.
pub const TOKEN_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-$";

/// Shortest legacy base64 payload accepted as a URL.
pub const LEGACY_MIN_LEN: usize = 10;

/// Forgiving base64, the way browsers' `atob` reads it.
const LEGACY_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Which decoding tier produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeTier {
    /// JSON payload with `url` and optional `pwd`.
    Structured,
    /// Decompressed text used verbatim as the URL.
    PlainText,
    /// Standard base64 of the URL.
    LegacyBase64,
}

/// A decoded token and the tier that decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// The recovered payload.
    pub payload: LinkPayload,
    /// Tier that produced it.
    pub tier: DecodeTier,
}

/// Why a token could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The token was empty.
    #[error("No encrypted URL provided. Please check your link.")]
    Empty,
    /// No tier could make sense of the token.
    #[error("This link is invalid or corrupted. Please check your link.")]
    Corrupt,
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::decode(err.to_string())
    }
}

/// Encodes payloads into tokens and back.
#[derive(Debug, Clone, Default)]
pub struct PayloadCodec;

impl PayloadCodec {
    /// Creates a new codec.
    pub fn new() -> Self {
        Self
    }

    /// Encode a payload into a URL-safe token.
    pub fn encode(&self, payload: &LinkPayload) -> AppResult<EncodedToken> {
        let json = serde_json::to_string(payload)?;
        Ok(EncodedToken::new(lz_str::compress_to_encoded_uri_component(
            json.as_str(),
        )))
    }

    /// Decode a token, trying each tier in order.
    pub fn decode(&self, token: &str) -> Result<DecodedPayload, DecodeError> {
        if token.is_empty() {
            return Err(DecodeError::Empty);
        }

        if let Some(text) = decompress(token) {
            if let Some(payload) = parse_structured(&text) {
                tracing::debug!(tier = "structured", "Token decoded");
                return Ok(DecodedPayload {
                    payload,
                    tier: DecodeTier::Structured,
                });
            }

            tracing::debug!(tier = "plain_text", "Token decoded");
            return Ok(DecodedPayload {
                payload: LinkPayload::open(text),
                tier: DecodeTier::PlainText,
            });
        }

        if let Some(text) = decode_legacy(token) {
            tracing::debug!(tier = "legacy_base64", "Token decoded");
            return Ok(DecodedPayload {
                payload: LinkPayload::open(text),
                tier: DecodeTier::LegacyBase64,
            });
        }

        tracing::debug!(token_len = token.len(), "Token could not be decoded");
        Err(DecodeError::Corrupt)
    }
}

/// LZ-string decompression. `None` unless it yields non-empty text.
fn decompress(token: &str) -> Option<String> {
    // Query-string parsing turns '+' into ' '.
    let normalized: String = token
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();

    if !normalized.chars().all(|c| TOKEN_ALPHABET.contains(c)) {
        return None;
    }

    let units = lz_str::decompress_from_encoded_uri_component(normalized.as_str())?;
    String::from_utf16(&units).ok().filter(|text| !text.is_empty())
}

/// Tier 1: a JSON object with a non-empty `url` string.
///
/// `pwd` may be absent, null or empty (no password); anything else must be
/// a well-formed digest or the tier fails.
fn parse_structured(text: &str) -> Option<LinkPayload> {
    let Value::Object(fields) = serde_json::from_str::<Value>(text).ok()? else {
        return None;
    };

    let url = fields.get("url")?.as_str().filter(|u| !u.is_empty())?;

    let password_hash = match fields.get("pwd") {
        None | Some(Value::Null) => None,
        Some(Value::String(pwd)) if pwd.is_empty() => None,
        Some(Value::String(pwd)) => Some(pwd.parse::<PasswordDigest>().ok()?),
        Some(_) => return None,
    };

    Some(LinkPayload {
        url: url.to_string(),
        password_hash,
    })
}

/// Tier 3: standard base64, each decoded byte read as one character.
fn decode_legacy(token: &str) -> Option<String> {
    let compact: String = token.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LEGACY_BASE64.decode(compact.as_bytes()).ok()?;
    let text: String = bytes.iter().map(|&b| char::from(b)).collect();
    (text.chars().count() >= LEGACY_MIN_LEN).then_some(text)
}
