//! Route definitions for the complaint lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::complaints;
use crate::state::AppState;

/// ```text
/// GET  /complaints               -> filing_form (auth)
/// POST /complaints               -> file_complaint (auth)
/// GET  /my-complaints            -> my_complaints (auth)
/// GET  /complaint/{id}           -> get_complaint (owner or officer+)
/// POST /complaint/{id}/comments  -> add_comment (owner or officer+)
/// GET  /admin-complaints         -> all_complaints (officer+)
/// POST /update-complaint-status  -> update_status (officer+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/complaints",
            get(complaints::filing_form).post(complaints::file_complaint),
        )
        .route("/my-complaints", get(complaints::my_complaints))
        .route("/complaint/{id}", get(complaints::get_complaint))
        .route("/complaint/{id}/comments", post(complaints::add_comment))
        .route("/admin-complaints", get(complaints::all_complaints))
        .route(
            "/update-complaint-status",
            post(complaints::update_status),
        )
}
