use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header::AUTHORIZATION, header::WWW_AUTHENTICATE, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::Session;
use super::helpers::{
    TokenValidationError, ValidatedToken, extract_token_from_header, validate_token,
};
use crate::reports::Viewer;
use crate::server::AppState;
use crate::types::{Profile, Role, Token};

/// Extractor that requires any valid token, admin or profile.
pub struct RequireAuth(pub Token);

/// Extractor that requires an admin token.
pub struct RequireAdmin(pub Token);

/// Extractor that never rejects; it reports which session state applies.
pub struct CurrentSession(pub Session);

/// Extractor that requires a profile token whose profile exists. The role may
/// still be unassigned.
pub struct RequireProfile {
    pub token: Token,
    pub profile: Profile,
}

/// Extractor that requires a profile with an assigned role.
pub struct RequireRole {
    pub token: Token,
    pub profile: Profile,
    pub role: Role,
}

impl RequireRole {
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.profile.id.clone(), Some(self.role))
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
    TokenExpired,
    NotAdmin,
    ProfileRequired,
    ProfileMissing,
    RoleUnassigned,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuth => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidScheme => (StatusCode::UNAUTHORIZED, "Invalid authorization scheme"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::NotAdmin => (StatusCode::FORBIDDEN, "Admin access required"),
            AuthError::ProfileRequired => (
                StatusCode::FORBIDDEN,
                "Profile token required for this operation",
            ),
            AuthError::ProfileMissing => (StatusCode::FORBIDDEN, "Profile not found"),
            AuthError::RoleUnassigned => (
                StatusCode::FORBIDDEN,
                "No role assigned yet; contact an administrator",
            ),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "data": null, "error": message });
        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"dayreport\""),
            );
        }

        response
    }
}

impl From<TokenValidationError> for AuthError {
    fn from(e: TokenValidationError) -> Self {
        match e {
            TokenValidationError::InvalidScheme => AuthError::InvalidScheme,
            TokenValidationError::InvalidToken => AuthError::InvalidToken,
            TokenValidationError::TokenExpired => AuthError::TokenExpired,
            TokenValidationError::InternalError => AuthError::InternalError,
        }
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let validated = extract_and_validate(parts, state)?;
        Ok(RequireAuth(validated.token))
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let validated = extract_and_validate(parts, state)?;
        if !validated.token.is_admin {
            return Err(AuthError::NotAdmin);
        }
        Ok(RequireAdmin(validated.token))
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(Session::resolve(state, auth_header(parts))))
    }
}

impl FromRequestParts<Arc<AppState>> for RequireProfile {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let ValidatedToken { token, profile } = extract_and_validate(parts, state)?;
        if token.is_admin {
            return Err(AuthError::ProfileRequired);
        }
        let profile = profile.ok_or(AuthError::ProfileMissing)?;
        Ok(RequireProfile { token, profile })
    }
}

impl FromRequestParts<Arc<AppState>> for RequireRole {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let RequireProfile { token, profile } =
            RequireProfile::from_request_parts(parts, state).await?;
        let role = profile.role.ok_or(AuthError::RoleUnassigned)?;
        Ok(RequireRole {
            token,
            profile,
            role,
        })
    }
}

fn auth_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}

fn extract_and_validate(
    parts: &Parts,
    state: &Arc<AppState>,
) -> Result<ValidatedToken, AuthError> {
    let raw_token = extract_token_from_header(auth_header(parts))?.ok_or(AuthError::MissingAuth)?;
    Ok(validate_token(state, &raw_token)?)
}
