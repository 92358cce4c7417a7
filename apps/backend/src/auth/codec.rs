//! Compact HS256 token codec.
//!
//! Wire format, three base64url (unpadded) segments joined by `.`:
//!
//! ```text
//! b64(header-json) . b64(claims-json) . b64(HMAC-SHA256(secret, seg1 "." seg2))
//! ```
//!
//! Everything here is a pure function of its inputs and the clock reading.
//! The `*_at` variants take the clock reading explicitly.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::claims::{Claims, RESERVED_CLAIMS};
use super::error::{SignError, TokenError};

type HmacSha256 = Hmac<Sha256>;

/// The only signing algorithm issued or accepted.
pub const ALGORITHM: &str = "HS256";

const TOKEN_TYPE: &str = "JWT";

/// Token header. Field order fixes the serialized form to
/// `{"alg":"HS256","typ":"JWT"}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    pub fn hs256() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: Some(TOKEN_TYPE.to_string()),
        }
    }
}

/// Sign `claims` with `secret`, valid for `lifetime` from now.
pub fn sign(
    claims: Map<String, Value>,
    secret: &[u8],
    lifetime: Duration,
) -> Result<String, SignError> {
    sign_at(claims, secret, lifetime, SystemTime::now())
}

/// Sign `claims` as if the clock read `now`.
///
/// Any `iat`/`exp` keys in `claims` are replaced by values derived from
/// `now` and `lifetime`. The secret must not be empty.
pub fn sign_at(
    mut claims: Map<String, Value>,
    secret: &[u8],
    lifetime: Duration,
    now: SystemTime,
) -> Result<String, SignError> {
    if secret.is_empty() {
        return Err(SignError::InvalidKey);
    }
    let lifetime = i64::try_from(lifetime.as_secs()).map_err(|_| SignError::ExpiryOverflow)?;
    if lifetime == 0 {
        return Err(SignError::NonPositiveLifetime);
    }

    let issued_at = unix_seconds(now);
    let expires_at = issued_at
        .checked_add(lifetime)
        .ok_or(SignError::ExpiryOverflow)?;

    for key in RESERVED_CLAIMS {
        claims.remove(key);
    }

    let claims = Claims {
        issued_at,
        expires_at,
        extra: claims,
    };
    encode(&Header::hs256(), &claims, secret)
}

/// Verify `token` against `secret` and the current clock.
pub fn verify(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    verify_at(token, secret, SystemTime::now())
}

/// Verify `token` as if the clock read `now`.
///
/// Checks run in a fixed order: shape, signature, header, claims, expiry.
/// Nothing from the payload is trusted before the signature matches. An
/// empty secret verifies nothing.
pub fn verify_at(token: &str, secret: &[u8], now: SystemTime) -> Result<Claims, TokenError> {
    let (header, payload, signature) = split_token(token)?;

    let provided = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::InvalidSignature)?;
    let signing_input = &token[..header.len() + 1 + payload.len()];
    let expected =
        compute_signature(signing_input, secret).ok_or(TokenError::InvalidSignature)?;

    // Slice ct_eq returns false on length mismatch; the tag length is public.
    if !bool::from(expected.as_slice().ct_eq(provided.as_slice())) {
        return Err(TokenError::InvalidSignature);
    }

    let header: Header = decode_segment(header)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::Malformed);
    }

    let claims: Claims = decode_segment(payload)?;
    if claims.expires_at <= unix_seconds(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Seconds since the Unix epoch, negative for instants before it.
pub(crate) fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|secs| -secs)
            .unwrap_or(i64::MIN),
    }
}

fn encode(header: &Header, claims: &Claims, secret: &[u8]) -> Result<String, SignError> {
    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header)?);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{header}.{payload}");

    let signature = compute_signature(&signing_input, secret).ok_or(SignError::InvalidKey)?;
    let signature = URL_SAFE_NO_PAD.encode(signature);

    Ok(format!("{signing_input}.{signature}"))
}

fn split_token(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut segments = token.split('.');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(TokenError::Malformed),
    }
}

/// HMAC-SHA256 tag over `signing_input`, or `None` for an empty secret.
fn compute_signature(signing_input: &str, secret: &[u8]) -> Option<Vec<u8>> {
    if secret.is_empty() {
        return None;
    }
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(signing_input.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}
