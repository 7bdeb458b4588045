use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::auth::RequireRole;
use crate::server::AppState;
use crate::server::dto::PaginationParams;
use crate::server::response::{
    ApiError, DEFAULT_PAGE_SIZE, PaginatedResponse, StoreResultExt, paginate,
};
use crate::types::Role;

/// Newest first. The cursor is the `created_at` of the last entry seen.
pub async fn list_activity(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    if auth.role != Role::SeniorManager {
        return Err(ApiError::forbidden("Activity log is limited to Senior Manager"));
    }

    let cursor = params.cursor.as_deref().unwrap_or("");
    let entries = state
        .store
        .list_activity_logs(cursor, DEFAULT_PAGE_SIZE + 1)
        .api_err("Failed to list activity")?;

    let (entries, next_cursor, has_more) =
        paginate(entries, DEFAULT_PAGE_SIZE as usize, |e| e.created_at.to_rfc3339());

    Ok(Json(PaginatedResponse::new(entries, next_cursor, has_more)))
}
