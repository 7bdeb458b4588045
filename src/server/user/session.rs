use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::{CurrentSession, RequireAuth};
use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

/// Reports which session state applies to the caller. Never rejects.
pub async fn get_session(CurrentSession(session): CurrentSession) -> impl IntoResponse {
    Json(ApiResponse::success(session))
}

/// Revokes the presented token.
pub async fn logout(
    RequireAuth(token): RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_token(&token.id)
        .api_err("Failed to revoke token")?;

    tracing::info!("Token {} revoked on logout", token.id);
    Ok(StatusCode::NO_CONTENT)
}
