mod access;
mod activity;
mod notifications;
mod reports;
mod session;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn user_router() -> Router<Arc<AppState>> {
    Router::new()
        // Session
        .route("/session", get(session::get_session))
        .route("/session/logout", post(session::logout))
        // Reports
        .route(
            "/reports",
            get(reports::list_reports).post(reports::submit_report),
        )
        .route(
            "/reports/{kind}/{id}",
            get(reports::get_report).patch(reports::update_report),
        )
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route("/notifications/{id}/read", post(notifications::mark_read))
        // Activity
        .route("/activity", get(activity::list_activity))
}
