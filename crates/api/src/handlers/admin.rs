//! Handlers for account administration: the dashboard, officer
//! provisioning, and user deletion with last-admin protection.
//!
//! All handlers require the ADMIN role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nivaran_core::error::CoreError;
use nivaran_core::roles::Role;
use nivaran_core::types::DbId;
use nivaran_db::models::complaint::Complaint;
use nivaran_db::models::user::{CreateUser, UserResponse};
use nivaran_db::repositories::{ComplaintRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{check_password_policy, hash_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `GET /admin`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub officers: Vec<UserResponse>,
    pub citizens: Vec<UserResponse>,
    pub complaints: Vec<Complaint>,
}

/// Request body for `POST /create-officer`.
#[derive(Debug, Deserialize)]
pub struct CreateOfficerRequest {
    pub username: String,
    pub email: String,
    pub age: i32,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin
///
/// Dashboard data: officer and citizen account lists plus every complaint,
/// newest first.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DashboardResponse>> {
    let officers = UserRepo::list_by_role(&state.pool, Role::Officer).await?;
    let citizens = UserRepo::list_by_role(&state.pool, Role::Citizen).await?;
    let complaints = ComplaintRepo::list_all(&state.pool).await?;

    Ok(Json(DashboardResponse {
        officers: officers.iter().map(UserResponse::from).collect(),
        citizens: citizens.iter().map(UserResponse::from).collect(),
        complaints,
    }))
}

/// POST /create-officer
///
/// Provision an officer account. Fails with 409 if the email is taken.
pub async fn create_officer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateOfficerRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
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
        role: Role::Officer,
    };
    let officer = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        officer_id = officer.id,
        admin_id = admin.user_id,
        "Officer account provisioned"
    );

    Ok((StatusCode::CREATED, Json(UserResponse::from(&officer))))
}

/// POST /delete-user/{user_id}
///
/// Hard-delete an account. Deleting the last remaining admin is refused so
/// the system can never lock every administrator out.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let target = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    if target.role == Role::Admin {
        let admin_count = UserRepo::count_by_role(&state.pool, Role::Admin).await?;
        if admin_count <= 1 {
            return Err(AppError::Core(CoreError::Conflict(
                "Cannot delete the last admin account".into(),
            )));
        }
    }

    UserRepo::delete(&state.pool, user_id).await?;

    tracing::info!(
        deleted_user_id = user_id,
        deleted_role = %target.role,
        admin_id = admin.user_id,
        "User account deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
