//! Handlers for registration, login, and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::Json;
use nivaran_core::error::CoreError;
use nivaran_core::roles::Role;
use nivaran_core::types::DbId;
use nivaran_db::models::user::{CreateUser, User};
use nivaran_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{check_password_policy, hash_password, verify_password};
use crate::auth::session;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /create` (citizen registration).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub age: i32,
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Extends the session to 30 days when set.
    #[serde(default)]
    pub remember: bool,
}

/// Successful authentication response returned by register and login.
/// The session token itself travels in the cookie, not the body.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /create
///
/// Register a new citizen account. Everyone registered through this form is
/// role CITIZEN; officers are provisioned by an admin. Issues a 1-day
/// session cookie on success.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    check_password_policy(&input.password)?;
    let hashed = hash_password(&input.password)?;

    let create_dto = CreateUser {
        username: input.username.clone(),
        display_name: input.username,
        email: input.email,
        password_hash: hashed,
        age: input.age,
        role: Role::Citizen,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    let (cookie, response) = issue_session(&state, &user, false)?;
    Ok((StatusCode::CREATED, [(SET_COOKIE, cookie)], Json(response)))
}

/// POST /login
///
/// Authenticate with email + password. Issues a session cookie lasting one
/// day, or thirty with `remember`.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "No such user exists. Create one?".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect credentials. Verify your email and password".into(),
        )));
    }

    let (cookie, response) = issue_session(&state, &user, input.remember)?;
    Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(response)))
}

/// GET /logout
///
/// Discard the session cookie. Deliberately does not require a valid
/// session: logging out with an expired token must still work.
pub async fn logout() -> impl axum::response::IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, session::clear_session_cookie())],
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a session token for `user` and build the Set-Cookie value plus
/// the response body.
fn issue_session(
    state: &AppState,
    user: &User,
    remember: bool,
) -> AppResult<(HeaderValue, AuthResponse)> {
    let token = generate_session_token(
        user.id,
        &user.email,
        user.role,
        &user.username,
        remember,
        &state.config.auth,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_in = state.config.auth.session_lifetime_secs(remember);
    let cookie = HeaderValue::from_str(&session::session_cookie(&token, expires_in))
        .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;

    Ok((
        cookie,
        AuthResponse {
            expires_in,
            user: UserInfo {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                role: user.role,
            },
        },
    ))
}
