//! Compact token codec.
//!
//! A token is three dot-separated base64url segments (header, payload,
//! signature). This codec establishes structure and extracts the payload
//! claims; it deliberately does **not** verify the signature — trust in the
//! signature is delegated to the issuing server.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use opsdeck_core::{SessionError, SessionResult};

use crate::Claims;

/// Whether `raw` splits into exactly three non-empty dot-separated segments.
///
/// Anything else is never treated as a token, even if it was found in storage.
pub fn has_token_shape(raw: &str) -> bool {
    let mut segments = raw.split('.');
    matches!(
        (segments.next(), segments.next(), segments.next(), segments.next()),
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty()
    )
}

/// Decode the payload segment of a compact token into [`Claims`].
///
/// Pure function, no I/O: storage cleanup on failure is the caller's
/// responsibility, and callers receive a tagged result rather than a panic or
/// an exception-style escape.
pub fn decode(raw: Option<&str>) -> SessionResult<Claims> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw.trim(),
        _ => return Err(SessionError::MissingToken),
    };

    if !has_token_shape(raw) {
        return Err(SessionError::malformed(
            "expected three dot-separated segments",
        ));
    }

    let payload = raw.split('.').nth(1).unwrap_or("");

    // Tolerate padded producers; the canonical form is unpadded base64url.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| SessionError::malformed(format!("payload is not base64url: {err}")))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|err| SessionError::malformed(format!("payload is not a claims object: {err}")))?;

    if claims.id.trim().is_empty() {
        return Err(SessionError::malformed("payload lacks a subject id"));
    }

    Ok(claims)
}
