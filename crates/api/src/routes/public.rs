//! Route definitions for the public, unauthenticated surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// POST /track-status            -> track_status
/// POST /chat                    -> chat
/// GET  /api/schemes/{category}  -> schemes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/track-status", post(public::track_status))
        .route("/chat", post(public::chat))
        .route("/api/schemes/{category}", get(public::schemes))
}
