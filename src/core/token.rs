//! Cryptographically secure token generation
//!
//! Tokens are raw bytes from the operating system CSPRNG, encoded with
//! URL-safe base64 without padding so they can be embedded directly in a
//! deep-link query parameter.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

use crate::core::error::{LinkError, LinkResult};

/// Generate a URL-safe random token from `byte_length` bytes of OS entropy
///
/// The encoded string is longer than `byte_length` (base64 expansion) and
/// contains no `+`, `/` or `=` characters.
pub fn generate_token(byte_length: usize) -> LinkResult<String> {
    let mut bytes = vec![0u8; byte_length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| LinkError::Internal(format!("random source failure: {:?}", e)))?;
    Ok(URL_SAFE_NO_PAD.encode(&bytes))
}
