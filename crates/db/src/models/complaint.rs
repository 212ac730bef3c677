//! Complaint entity model, comment model, and DTOs.

use nivaran_core::complaint::{Category, Priority, Status};
use nivaran_core::roles::Role;
use nivaran_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full complaint row from the `complaints` table.
///
/// `user_id` is `None` for complaints whose filer account was deleted;
/// complaints themselves are never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Complaint {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub tracking_id: String,
    pub priority: Priority,
    pub status: Status,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new complaint. Status is always PENDING and priority
/// `medium` at creation, so neither appears here.
#[derive(Debug)]
pub struct CreateComplaint {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub tracking_id: String,
    pub user_id: DbId,
}

/// A single audit comment on a complaint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ComplaintComment {
    pub id: DbId,
    pub complaint_id: DbId,
    pub user_id: Option<DbId>,
    pub author_role: Role,
    pub body: String,
    pub created_at: Timestamp,
}
