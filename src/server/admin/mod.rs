mod profiles;
mod tokens;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::server::AppState;

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        // Profile routes
        .route("/profiles", post(profiles::create_profile))
        .route("/profiles", get(profiles::list_profiles))
        .route(
            "/profiles/{id}",
            get(profiles::get_profile).patch(profiles::update_profile),
        )
        .route("/profiles/{id}/tokens", get(tokens::list_profile_tokens))
        .route("/profiles/{id}/tokens", post(tokens::create_profile_token))
        // Token routes
        .route("/tokens/{id}", delete(tokens::delete_token))
}
