//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use nivaran_core::roles::Role;
use nivaran_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::auth::session;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal extracted from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub email: String,
    pub role: Role,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session::token_from_headers(&parts.headers).filter(|t| !t.is_empty());

        let Some(token) = token else {
            // The complaint-filing path gets its own login prompt.
            let message = if parts.uri.path() == "/complaints" {
                "Please login first to register a complaint"
            } else {
                "You must be logged in to access this resource"
            };
            return Err(AppError::Unauthenticated {
                code: "LOGIN_REQUIRED",
                message: message.to_string(),
                clear_cookie: false,
            });
        };

        let claims = validate_token(&token, &state.config.auth).map_err(|err| {
            tracing::debug!(error = %err, "Session token rejected");
            AppError::Unauthenticated {
                code: "SESSION_EXPIRED",
                message: "Your session has expired. Please login again.".to_string(),
                clear_cookie: true,
            }
        })?;

        // A token that verifies but lacks required claims is a corrupt
        // session (issued by an older deployment, or tampered with).
        let (Some(user_id), Some(email), Some(role), Some(username)) =
            (claims.sub, claims.email, claims.role, claims.username)
        else {
            return Err(AppError::Unauthenticated {
                code: "SESSION_INVALID",
                message: "Your session is invalid. Please login again.".to_string(),
                clear_cookie: true,
            });
        };

        Ok(AuthUser {
            user_id,
            email,
            role,
            username,
        })
    }
}
