use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Duration;

use crate::auth::{RequireAdmin, TokenIssuer};
use crate::server::AppState;
use crate::server::dto::{CreateProfileTokenRequest, CreateTokenResponse, TokenResponse};
use crate::server::response::{
    ApiError, ApiResponse, StoreOptionExt, StoreResultExt,
};

pub async fn list_profile_tokens(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .store
        .get_profile(&id)
        .api_err("Failed to get profile")?
        .or_not_found("Profile not found")?;

    let tokens: Vec<TokenResponse> = state
        .store
        .list_profile_tokens(&profile.id)
        .api_err("Failed to list profile tokens")?
        .into_iter()
        .map(TokenResponse::from)
        .collect();

    Ok(Json(ApiResponse::success(tokens)))
}

pub async fn create_profile_token(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CreateProfileTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .store
        .get_profile(&id)
        .api_err("Failed to get profile")?
        .or_not_found("Profile not found")?;

    let ttl = match req.expires_in_seconds {
        Some(seconds) if seconds < 0 => {
            return Err(ApiError::bad_request(
                "expires_in_seconds cannot be negative",
            ));
        }
        Some(seconds) => Some(Duration::seconds(seconds)),
        None => None,
    };

    let issued = TokenIssuer::new()
        .issue_stored(state.store.as_ref(), Some(&profile.id), ttl)
        .api_err("Failed to create token")?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateTokenResponse {
            token: issued.raw,
            metadata: TokenResponse::from(issued.token),
        })),
    ))
}

pub async fn delete_token(
    admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .store
        .get_token_by_id(&id)
        .api_err("Failed to get token")?
        .or_not_found("Token not found")?;

    if token.id == admin.0.id {
        return Err(ApiError::bad_request("Cannot delete current token"));
    }

    state
        .store
        .delete_token(&token.id)
        .api_err("Failed to delete token")?;

    Ok(StatusCode::NO_CONTENT)
}
