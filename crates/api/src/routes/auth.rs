//! Route definitions for registration, login, and logout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /create   -> register (always role CITIZEN)
/// POST /login    -> login
/// GET  /logout   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
}
