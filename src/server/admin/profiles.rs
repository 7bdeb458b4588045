use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::{CreateProfileRequest, PaginationParams, UpdateProfileRequest};
use crate::server::response::{
    ApiError, ApiResponse, DEFAULT_PAGE_SIZE, PaginatedResponse, StoreOptionExt, StoreResultExt,
    paginate,
};
use crate::server::validation::{validate_first_name, validate_last_name};
use crate::types::Profile;

pub async fn create_profile(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_first_name(&req.first_name)?;
    validate_last_name(&req.last_name)?;

    let now = Utc::now();
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        role: req.role,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_profile(&profile)
        .api_err("Failed to create profile")?;

    tracing::info!(
        "Created profile {} ({})",
        profile.id,
        profile.role.map_or("no role", |r| r.as_str())
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(profile))))
}

pub async fn list_profiles(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let cursor = params.cursor.as_deref().unwrap_or("");

    let profiles = state
        .store
        .list_profiles(cursor, DEFAULT_PAGE_SIZE + 1)
        .api_err("Failed to list profiles")?;

    let (profiles, next_cursor, has_more) =
        paginate(profiles, DEFAULT_PAGE_SIZE as usize, |p| p.id.clone());

    Ok(Json(PaginatedResponse::new(profiles, next_cursor, has_more)))
}

pub async fn get_profile(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .store
        .get_profile(&id)
        .api_err("Failed to get profile")?
        .or_not_found("Profile not found")?;

    Ok(Json(ApiResponse::success(profile)))
}

/// Renames a profile or changes its role. Role changes only happen here.
pub async fn update_profile(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut profile = state
        .store
        .get_profile(&id)
        .api_err("Failed to get profile")?
        .or_not_found("Profile not found")?;

    if let Some(first_name) = req.first_name {
        validate_first_name(&first_name)?;
        profile.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = req.last_name {
        validate_last_name(&last_name)?;
        profile.last_name = last_name.trim().to_string();
    }
    if let Some(role) = req.role {
        if role != profile.role {
            tracing::info!(
                "Profile {} role {} -> {}",
                profile.id,
                profile.role.map_or("none", |r| r.as_str()),
                role.map_or("none", |r| r.as_str())
            );
        }
        profile.role = role;
    }
    profile.updated_at = Utc::now();

    state
        .store
        .update_profile(&profile)
        .api_err("Failed to update profile")?;

    Ok(Json(ApiResponse::success(profile)))
}
