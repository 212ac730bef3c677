//! Route definitions for account administration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// All routes require the ADMIN role (enforced by handler extractors).
///
/// ```text
/// GET  /admin                   -> dashboard
/// POST /create-officer          -> create_officer
/// POST /delete-user/{user_id}   -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/create-officer", post(admin::create_officer))
        .route("/delete-user/{user_id}", post(admin::delete_user))
}
