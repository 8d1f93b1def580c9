//! JWT decoding for the Jobly auth token.
//!
//! The backend signs tokens with a `username` claim. The browser never
//! verifies the signature (the backend does that on every request); it only
//! needs the username to fetch the profile.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::TokenDecodeError;

/// Claims carried in a Jobly auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Login name of the token's owner (required)
    pub username: String,

    /// Admin flag (optional)
    #[serde(default)]
    pub is_admin: bool,

    /// Issued at timestamp (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// Decodes a JWT and extracts its claims without verifying the signature.
///
/// # Example
///
/// ```ignore
/// let claims = decode_token(&token)?;
/// let user = api.get_current_user(&claims.username).await?;
/// ```
pub fn decode_token(token: &str) -> Result<TokenClaims, TokenDecodeError> {
    tracing::trace!("Decoding auth token to extract claims");

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = parts.as_slice() else {
        tracing::warn!("Invalid JWT format: expected 3 parts, got {}", parts.len());
        return Err(TokenDecodeError::Format(parts.len()));
    };

    // Some encoders pad the segments; base64url in JWTs is unpadded.
    let decoded_bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: TokenClaims = serde_json::from_slice(&decoded_bytes)?;

    tracing::trace!("Decoded auth token for {}", claims.username);
    Ok(claims)
}

/// Decodes a JWT and returns only the username claim.
pub fn decode_username(token: &str) -> Result<String, TokenDecodeError> {
    decode_token(token).map(|claims| claims.username)
}
