pub mod admin;
pub mod auth;
pub mod complaints;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// Route hierarchy:
///
/// ```text
/// GET  /health                     liveness + db check (public)
///
/// POST /create                     citizen registration (public)
/// POST /login                      login (public)
/// GET  /logout                     discard session cookie (public)
///
/// GET  /complaints                 filing-form metadata (auth)
/// POST /complaints                 file a complaint (auth)
/// GET  /my-complaints              caller's complaints (auth)
/// GET  /complaint/{id}             detail + comments (owner or officer+)
/// POST /complaint/{id}/comments    append comment (owner or officer+)
/// GET  /admin-complaints           all complaints (officer+)
/// POST /update-complaint-status    triage (officer+)
///
/// GET  /admin                      dashboard data (admin)
/// POST /create-officer             provision officer (admin)
/// POST /delete-user/{user_id}      delete account (admin)
///
/// POST /track-status               public tracking lookup
/// POST /chat                       help assistant passthrough (public)
/// GET  /api/schemes/{category}     scheme lookup (public)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(complaints::router())
        .merge(admin::router())
        .merge(public::router())
}
