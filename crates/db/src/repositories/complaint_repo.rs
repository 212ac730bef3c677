//! Repository for the `complaints` and `complaint_comments` tables.

use nivaran_core::complaint::Status;
use nivaran_core::roles::Role;
use nivaran_core::types::DbId;
use sqlx::PgPool;

use crate::models::complaint::{Complaint, ComplaintComment, CreateComplaint};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, location, tracking_id, priority, \
                        status, user_id, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, complaint_id, user_id, author_role, body, created_at";

/// Provides CRUD operations for complaints and their comments.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a new complaint with status PENDING and priority `medium`.
    ///
    /// The `uq_complaints_tracking_id` constraint makes a duplicate tracking
    /// id a hard failure rather than a silent overwrite.
    pub async fn create(pool: &PgPool, input: &CreateComplaint) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints (title, description, category, location, tracking_id, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category)
            .bind(&input.location)
            .bind(&input.tracking_id)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a complaint by its public tracking identifier.
    pub async fn find_by_tracking_id(
        pool: &PgPool,
        tracking_id: &str,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE tracking_id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(tracking_id)
            .fetch_optional(pool)
            .await
    }

    /// List the complaints filed by one user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Complaint>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM complaints WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every complaint, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints ORDER BY created_at DESC");
        sqlx::query_as::<_, Complaint>(&query).fetch_all(pool).await
    }

    /// Set a complaint's status and refresh `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists. Whether the
    /// transition is legal is decided by the caller; this is a plain write.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: Status,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Append an audit comment to a complaint. A single INSERT, so there is
    /// no lost-update window between concurrent commenters.
    pub async fn add_comment(
        pool: &PgPool,
        complaint_id: DbId,
        user_id: DbId,
        author_role: Role,
        body: &str,
    ) -> Result<ComplaintComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaint_comments (complaint_id, user_id, author_role, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ComplaintComment>(&query)
            .bind(complaint_id)
            .bind(user_id)
            .bind(author_role)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// List a complaint's comments, oldest first.
    pub async fn list_comments(
        pool: &PgPool,
        complaint_id: DbId,
    ) -> Result<Vec<ComplaintComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM complaint_comments
             WHERE complaint_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ComplaintComment>(&query)
            .bind(complaint_id)
            .fetch_all(pool)
            .await
    }
}
