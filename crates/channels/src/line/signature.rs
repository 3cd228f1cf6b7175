//! Webhook signature validation.
//!
//! LINE signs every webhook request with the channel secret: the
//! `X-Line-Signature` header holds the base64-encoded HMAC-SHA256 digest of
//! the raw request body.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use eatba_core::error::ChannelError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Compute the signature LINE would send for `body`.
pub fn sign(channel_secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check `signature` against the HMAC of `body`.
///
/// Uses constant-time comparison. An empty secret never validates.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    if channel_secret.is_empty() {
        return false;
    }

    let provided = match STANDARD.decode(signature.trim()) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}

/// Authenticate a webhook request from its (possibly absent) signature header.
pub fn check_signature(
    channel_secret: &str,
    body: &[u8],
    signature: Option<&str>,
) -> Result<(), ChannelError> {
    match signature {
        Some(signature) if verify_signature(channel_secret, body, signature) => Ok(()),
        _ => Err(ChannelError::InvalidSignature),
    }
}
