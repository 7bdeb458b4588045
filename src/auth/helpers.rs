use std::sync::Arc;

use chrono::Utc;

use super::{TokenIssuer, parse_token};
use crate::server::AppState;
use crate::types::{Profile, Token};

#[derive(Debug)]
pub enum TokenValidationError {
    InvalidScheme,
    InvalidToken,
    TokenExpired,
    InternalError,
}

pub struct ValidatedToken {
    pub token: Token,
    /// `None` for admin tokens and for profile tokens whose profile row is gone.
    pub profile: Option<Profile>,
}

/// Extracts a token string from a Basic auth header.
/// Expects format: Basic base64(x-token:actual_token)
pub fn extract_basic_auth_token(header: &str) -> Option<String> {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;

    match credentials.split_once(':')? {
        ("x-token", password) => Some(password.to_string()),
        _ => None,
    }
}

/// Pulls the raw token out of an Authorization header value.
/// `Ok(None)` means no header was sent.
pub fn extract_token_from_header(
    auth_header: Option<&str>,
) -> Result<Option<String>, TokenValidationError> {
    let Some(header) = auth_header else {
        return Ok(None);
    };

    if let Some(bearer) = header.strip_prefix("Bearer ") {
        return Ok(Some(bearer.trim().to_string()));
    }
    if header.starts_with("Basic ") {
        return extract_basic_auth_token(header)
            .map(Some)
            .ok_or(TokenValidationError::InvalidToken);
    }
    Err(TokenValidationError::InvalidScheme)
}

/// Checks a raw token against the store and loads its profile.
pub fn validate_token(
    state: &Arc<AppState>,
    raw_token: &str,
) -> Result<ValidatedToken, TokenValidationError> {
    let parts = parse_token(raw_token).map_err(|_| TokenValidationError::InvalidToken)?;

    let token = state
        .store
        .get_token_by_lookup(parts.lookup)
        .map_err(|e| {
            tracing::error!("Token lookup failed: {e}");
            TokenValidationError::InternalError
        })?
        .ok_or(TokenValidationError::InvalidToken)?;

    let verified = TokenIssuer::new()
        .verify(raw_token, &token.token_hash)
        .map_err(|_| TokenValidationError::InternalError)?;
    if !verified {
        return Err(TokenValidationError::InvalidToken);
    }

    if token.expires_at.is_some_and(|at| at < Utc::now()) {
        return Err(TokenValidationError::TokenExpired);
    }

    let profile = match token.profile_id.as_deref() {
        Some(profile_id) => state
            .store
            .get_profile(profile_id)
            .map_err(|_| TokenValidationError::InternalError)?,
        None => None,
    };

    if let Err(e) = state.store.update_token_last_used(&token.id) {
        tracing::warn!("Failed to update token last_used_at: {e}");
    }

    Ok(ValidatedToken { token, profile })
}
