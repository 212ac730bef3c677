//! Public, unauthenticated endpoints: tracking-id lookup, the help
//! assistant passthrough, and scheme lookup by category.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nivaran_core::complaint::{Category, Priority, Status};
use nivaran_core::tracking::is_tracking_id;
use nivaran_core::types::Timestamp;
use nivaran_db::repositories::ComplaintRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Citizen-facing message for a lookup that matched nothing, whether the
/// id was malformed or simply unknown.
const NOT_FOUND_MESSAGE: &str = "No complaint found with the provided tracking ID. \
                                 Please check your tracking ID and try again.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /track-status`.
#[derive(Debug, Deserialize)]
pub struct TrackStatusRequest {
    #[serde(default)]
    pub tracking_id: String,
}

/// Citizen-facing lookup result. This endpoint never returns an HTTP error
/// for an unknown id; `found: false` plus a friendly message instead.
#[derive(Debug, Serialize)]
pub struct TrackStatusResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complaint: Option<StatusSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Public status summary, keyed by tracking id rather than internal id.
#[derive(Debug, Serialize)]
pub struct StatusSummary {
    /// The tracking identifier.
    pub id: String,
    /// Category with underscores replaced by spaces.
    pub r#type: String,
    pub description: String,
    pub status: Status,
    pub submitted_date: Timestamp,
    pub last_updated: Timestamp,
    pub title: String,
    pub location: String,
    pub priority: Priority,
}

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Query parameters for `GET /api/schemes/{category}`.
#[derive(Debug, Deserialize)]
pub struct SchemeQuery {
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /track-status
///
/// Public complaint lookup by tracking identifier. Store failures degrade
/// to a friendly message as well; this form must never surface an error
/// page to a citizen.
pub async fn track_status(
    State(state): State<AppState>,
    Json(input): Json<TrackStatusRequest>,
) -> Json<TrackStatusResponse> {
    let tracking_id = input.tracking_id.trim();

    // A malformed id can never match; skip the store round-trip.
    if !is_tracking_id(tracking_id) {
        return Json(TrackStatusResponse {
            found: false,
            complaint: None,
            error: Some(NOT_FOUND_MESSAGE.to_string()),
        });
    }

    match ComplaintRepo::find_by_tracking_id(&state.pool, tracking_id).await {
        Ok(Some(complaint)) => Json(TrackStatusResponse {
            found: true,
            complaint: Some(StatusSummary {
                id: complaint.tracking_id,
                r#type: complaint.category.display_name(),
                description: complaint.description,
                status: complaint.status,
                submitted_date: complaint.created_at,
                last_updated: complaint.updated_at,
                title: complaint.title,
                location: complaint.location,
                priority: complaint.priority,
            }),
            error: None,
        }),
        Ok(None) => Json(TrackStatusResponse {
            found: false,
            complaint: None,
            error: Some(NOT_FOUND_MESSAGE.to_string()),
        }),
        Err(err) => {
            tracing::error!(error = %err, "Tracking lookup failed");
            Json(TrackStatusResponse {
                found: false,
                complaint: None,
                error: Some(
                    "An error occurred while tracking your complaint. \
                     Please try again later."
                        .to_string(),
                ),
            })
        }
    }
}

/// POST /chat
///
/// Passthrough to the help assistant. Upstream failure produces a
/// structured apology envelope; the internal detail stays in the logs.
pub async fn chat(
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".into()));
    }

    match state.classifier.chat(&input.message).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!({ "response": response })))),
        Err(err) => {
            tracing::error!(error = %err, "Chat passthrough failed");
            // The apology text is the user-facing contract; the detail
            // stays in the logs.
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "I apologize, but I encountered an error processing your \
                              request. Please try again in a moment.",
                    "code": "ASSISTANT_ERROR",
                })),
            ))
        }
    }
}

/// GET /api/schemes/{category}
///
/// Public government-scheme lookup for a category, optionally refined by a
/// description. Rejects unknown categories with 400.
pub async fn schemes(
    State(state): State<AppState>,
    Path(category_raw): Path<String>,
    Query(query): Query<SchemeQuery>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let category: Category = category_raw
        .parse()
        .map_err(|_: String| AppError::BadRequest("Invalid category".into()))?;

    let schemes = state.classifier.scheme_info(category, &query.description).await;
    Ok((
        StatusCode::OK,
        Json(json!({ "category": category, "schemes": schemes })),
    ))
}
