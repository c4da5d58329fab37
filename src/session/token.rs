//! Structural validation of bearer tokens returned by `/login`.
//!
//! The client never verifies signatures; it only refuses credentials that are
//! not shaped like a JWT (`header.payload.signature`, base64url segments).
//! When the payload happens to be a JSON object its well-known claims are
//! surfaced for display and expiry checks.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use crate::net::types::Role;

const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Why a token failed structural decoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("token is empty")]
    Empty,
    #[error("token must have 3 segments, found {0}")]
    SegmentCount(usize),
    #[error("token segment {0} is empty")]
    EmptySegment(usize),
    #[error("token segment {0} is not base64url")]
    InvalidEncoding(usize),
}

/// Optional claims read from a JSON payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Role claim mapped onto the closed `Role` set.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::from_claim)
    }

    /// True once `exp` (seconds since epoch) is at or before `now`.
    #[must_use]
    pub fn is_expired(&self, now_unix_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_unix_secs)
    }
}

/// A token that passed structural validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedToken {
    pub raw: String,
    /// `None` when the payload decodes but is not a JSON object.
    pub claims: Option<TokenClaims>,
}

/// Validate `raw` as a three-segment base64url token.
///
/// # Errors
///
/// Returns a `TokenDecodeError` describing the first structural problem.
pub fn decode(raw: &str) -> Result<DecodedToken, TokenDecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TokenDecodeError::Empty);
    }
    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenDecodeError::SegmentCount(segments.len()));
    }
    if let Some(index) = segments.iter().position(|s| s.is_empty()) {
        return Err(TokenDecodeError::EmptySegment(index));
    }
    SEGMENT_ENGINE
        .decode(segments[0])
        .map_err(|_| TokenDecodeError::InvalidEncoding(0))?;
    let payload = SEGMENT_ENGINE
        .decode(segments[1])
        .map_err(|_| TokenDecodeError::InvalidEncoding(1))?;
    if !segments[2].bytes().all(is_base64url_byte) {
        return Err(TokenDecodeError::InvalidEncoding(2));
    }
    let claims = serde_json::from_slice::<TokenClaims>(&payload).ok();
    Ok(DecodedToken { raw: raw.to_owned(), claims })
}

fn is_base64url_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'='
}
