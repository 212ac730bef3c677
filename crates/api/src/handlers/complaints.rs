//! Handlers for the complaint lifecycle: filing, listing, detail,
//! comments, and officer triage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nivaran_core::complaint::{Category, Status, ALL_CATEGORIES};
use nivaran_core::error::CoreError;
use nivaran_core::tracking::generate_tracking_id;
use nivaran_core::types::DbId;
use nivaran_db::models::complaint::{Complaint, ComplaintComment, CreateComplaint};
use nivaran_db::repositories::ComplaintRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireCitizen, RequireOfficer};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `GET /complaints`: the data the filing form needs.
#[derive(Debug, Serialize)]
pub struct FilingFormResponse {
    pub categories: Vec<Category>,
}

/// Request body for `POST /complaints`.
#[derive(Debug, Deserialize)]
pub struct FileComplaintRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub specific_location: String,
}

/// Response body for a successfully filed complaint.
#[derive(Debug, Serialize)]
pub struct FileComplaintResponse {
    pub message: String,
    pub tracking_id: String,
    /// Government-scheme advisory from the classifier; empty when the
    /// collaborator was unavailable.
    pub scheme_info: String,
    pub complaint: Complaint,
}

/// Complaint detail with its audit comments.
#[derive(Debug, Serialize)]
pub struct ComplaintDetail {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub comments: Vec<ComplaintComment>,
}

/// Request body for `POST /complaint/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub text: String,
}

/// Request body for `POST /update-complaint-status`.
///
/// Both fields are `Option` so their absence maps to the 400 the original
/// form contract promises, not a deserialization error.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub complaint_id: Option<DbId>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /complaints
///
/// Filing-form metadata. Requires authentication like the filing POST, so
/// an anonymous visitor is prompted to log in before seeing the form.
pub async fn filing_form(RequireCitizen(_user): RequireCitizen) -> Json<FilingFormResponse> {
    Json(FilingFormResponse {
        categories: ALL_CATEGORIES.to_vec(),
    })
}

/// POST /complaints
///
/// File a complaint. The category is assigned by the classifier, never by
/// the filer; classifier failure degrades to OTHER rather than rejecting
/// the submission.
pub async fn file_complaint(
    State(state): State<AppState>,
    RequireCitizen(user): RequireCitizen,
    Json(input): Json<FileComplaintRequest>,
) -> AppResult<(StatusCode, Json<FileComplaintResponse>)> {
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Description is required for AI categorization".into(),
        )));
    }

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title is required".into(),
        )));
    }

    if input.state.trim().is_empty()
        || input.city.trim().is_empty()
        || input.specific_location.trim().is_empty()
    {
        return Err(AppError::Core(CoreError::Validation(
            "State, city, and specific location are required".into(),
        )));
    }

    let location = format!(
        "{}, {}, {}, India",
        input.specific_location.trim(),
        input.city.trim(),
        input.state.trim()
    );

    let category = state.classifier.categorize(&input.description).await;
    let scheme_info = state
        .classifier
        .scheme_info(category, &input.description)
        .await;

    let tracking_id = generate_tracking_id();

    let create_dto = CreateComplaint {
        title: input.title,
        description: input.description,
        category,
        location,
        tracking_id: tracking_id.clone(),
        user_id: user.user_id,
    };
    let complaint = ComplaintRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        user_id = user.user_id,
        tracking_id = %tracking_id,
        category = %category,
        "Complaint filed"
    );

    Ok((
        StatusCode::CREATED,
        Json(FileComplaintResponse {
            message: format!(
                "Complaint submitted successfully! Your tracking ID is: {tracking_id}"
            ),
            tracking_id,
            scheme_info,
            complaint,
        }),
    ))
}

/// GET /my-complaints
///
/// The caller's complaints, newest first.
pub async fn my_complaints(
    State(state): State<AppState>,
    RequireCitizen(user): RequireCitizen,
) -> AppResult<Json<Vec<Complaint>>> {
    let complaints = ComplaintRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(complaints))
}

/// GET /complaint/{id}
///
/// Detail view. Readable by the owner and by any officer or admin.
pub async fn get_complaint(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ComplaintDetail>> {
    let complaint = fetch_readable(&state, &user, id).await?;
    let comments = ComplaintRepo::list_comments(&state.pool, id).await?;
    Ok(Json(ComplaintDetail {
        complaint,
        comments,
    }))
}

/// POST /complaint/{id}/comments
///
/// Append an audit comment. Same read-access rule as the detail view: the
/// owner and elevated roles may comment.
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<ComplaintComment>)> {
    if input.text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment text is required".into(),
        )));
    }

    fetch_readable(&state, &user, id).await?;

    let comment =
        ComplaintRepo::add_comment(&state.pool, id, user.user_id, user.role, input.text.trim())
            .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /admin-complaints
///
/// Every complaint in the system, newest first. Officer or admin only.
pub async fn all_complaints(
    State(state): State<AppState>,
    RequireOfficer(_officer): RequireOfficer,
) -> AppResult<Json<Vec<Complaint>>> {
    let complaints = ComplaintRepo::list_all(&state.pool).await?;
    Ok(Json(complaints))
}

/// POST /update-complaint-status
///
/// Set a complaint's status and refresh its update timestamp. With
/// transition enforcement enabled, illegal moves (per the forward table in
/// `nivaran_core`) are rejected with 409; by default any status may be set.
pub async fn update_status(
    State(state): State<AppState>,
    RequireOfficer(officer): RequireOfficer,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<Complaint>> {
    let (Some(id), Some(status_raw)) = (input.complaint_id, input.status.as_deref()) else {
        return Err(AppError::BadRequest(
            "Complaint ID and status are required".into(),
        ));
    };

    let status: Status = status_raw
        .parse()
        .map_err(|msg: String| AppError::BadRequest(msg))?;

    if state.config.enforce_status_transitions {
        let current = ComplaintRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Complaint",
                id,
            }))?;
        if !current.status.can_transition_to(status) {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Cannot move complaint from {} to {}",
                current.status, status
            ))));
        }
    }

    let updated = ComplaintRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }))?;

    tracing::info!(
        complaint_id = id,
        status = %status,
        officer_id = officer.user_id,
        "Complaint status updated"
    );

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a complaint, enforcing the shared-read rule: the owner, or any
/// principal at officer level or above.
async fn fetch_readable(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Complaint> {
    let complaint = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }))?;

    let is_owner = complaint.user_id == Some(user.user_id);
    if !is_owner && !user.role.satisfies(nivaran_core::roles::Role::Officer) {
        return Err(AppError::Core(CoreError::Forbidden("Access denied".into())));
    }

    Ok(complaint)
}
