//! Role-gate extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet a minimum. All three gates go through the same
//! `Role::satisfies` ordering, so there is exactly one allowed-role list
//! in the codebase.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use nivaran_core::error::CoreError;
use nivaran_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

fn gate(user: AuthUser, minimum: Role, denial: &str) -> Result<AuthUser, AppError> {
    if user.role.satisfies(minimum) {
        Ok(user)
    } else {
        Err(AppError::Core(CoreError::Forbidden(denial.to_string())))
    }
}

/// Requires the ADMIN role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        gate(user, Role::Admin, "Access denied. Admin privileges required.").map(RequireAdmin)
    }
}

/// Requires OFFICER or ADMIN. Rejects with 403 Forbidden otherwise.
pub struct RequireOfficer(pub AuthUser);

impl FromRequestParts<AppState> for RequireOfficer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        gate(
            user,
            Role::Officer,
            "Access denied. Officer privileges required.",
        )
        .map(RequireOfficer)
    }
}

/// Requires any authenticated role (CITIZEN is the floor of the ordering).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireCitizen(pub AuthUser);

impl FromRequestParts<AppState> for RequireCitizen {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        gate(
            user,
            Role::Citizen,
            "Access denied. Citizen privileges required.",
        )
        .map(RequireCitizen)
    }
}
