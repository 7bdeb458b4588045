use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireProfile;
use crate::server::AppState;
use crate::server::dto::{NotificationParams, ReadAllResponse};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

pub async fn list_notifications(
    auth: RequireProfile,
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotificationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let notifications = state
        .store
        .list_notifications(&auth.profile.id, params.unread)
        .api_err("Failed to list notifications")?;

    Ok(Json(ApiResponse::success(notifications)))
}

pub async fn mark_read(
    auth: RequireProfile,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .store
        .mark_notification_read(&id, &auth.profile.id)
        .api_err("Failed to update notification")?;

    if !updated {
        return Err(ApiError::not_found("Notification not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_read(
    auth: RequireProfile,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .store
        .mark_all_notifications_read(&auth.profile.id)
        .api_err("Failed to update notifications")?;

    Ok(Json(ApiResponse::success(ReadAllResponse { updated })))
}
