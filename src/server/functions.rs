//! Aggregation endpoints. Unlike the rest of the API these answer with bare
//! JSON objects: the result on success, `{"error": ".."}` on failure.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde_json::json;

use crate::auth::RequireRole;
use crate::functions::{submission_status, summary_for_window};
use crate::server::AppState;
use crate::server::dto::DateParams;
use crate::types::Role;

pub fn functions_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(summary))
        .route("/submission-status", get(status))
}

#[derive(Debug)]
pub struct FunctionError {
    status: StatusCode,
    message: String,
}

impl FunctionError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn requested_date(params: &DateParams) -> Result<NaiveDate, FunctionError> {
    match params.date.as_deref().map(str::trim) {
        None | Some("") => Ok(Utc::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            FunctionError::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid date '{raw}', expected YYYY-MM-DD"),
            )
        }),
    }
}

fn require_manager(role: Role) -> Result<(), FunctionError> {
    if role.is_manager() {
        Ok(())
    } else {
        Err(FunctionError::new(
            StatusCode::FORBIDDEN,
            "Manager role required",
        ))
    }
}

async fn summary(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Result<impl IntoResponse, FunctionError> {
    require_manager(auth.role)?;
    let end = requested_date(&params)?;

    let summary = summary_for_window(state.store.as_ref(), end, state.summary_window_days)
        .map_err(|e| {
            tracing::error!("Summary for {end} failed: {e}");
            FunctionError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to compute summary")
        })?;

    Ok(Json(summary))
}

async fn status(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Result<impl IntoResponse, FunctionError> {
    require_manager(auth.role)?;
    let date = requested_date(&params)?;

    let submissions = submission_status(state.store.as_ref(), date).map_err(|e| {
        tracing::error!("Submission status for {date} failed: {e}");
        FunctionError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to compute submission status",
        )
    })?;

    Ok(Json(json!({ "submissions": submissions })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_date() {
        let params = DateParams {
            date: Some("2024-05-01".to_string()),
        };
        assert_eq!(
            requested_date(&params).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );

        let bad = DateParams {
            date: Some("01/05/2024".to_string()),
        };
        assert_eq!(
            requested_date(&bad).unwrap_err().status,
            StatusCode::BAD_REQUEST
        );

        assert!(requested_date(&DateParams::default()).is_ok());
    }

    #[test]
    fn test_only_managers() {
        assert!(require_manager(Role::SeniorManager).is_ok());
        assert!(require_manager(Role::ConsignmentSupervisor).is_ok());
        assert!(require_manager(Role::Cashier).is_err());
    }
}
