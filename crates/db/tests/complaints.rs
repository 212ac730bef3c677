//! CRUD and lifecycle tests for the complaints repository.

use nivaran_core::complaint::{Category, Priority, Status};
use nivaran_core::roles::Role;
use nivaran_core::tracking::generate_tracking_id;
use nivaran_core::types::DbId;
use nivaran_db::models::complaint::CreateComplaint;
use nivaran_db::models::user::CreateUser;
use nivaran_db::repositories::{ComplaintRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        display_name: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "$argon2id$fake-hash-for-tests".to_string(),
        age: 28,
        role: Role::Citizen,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn complaint_input(user_id: DbId, tracking_id: String) -> CreateComplaint {
    CreateComplaint {
        title: "Pothole".to_string(),
        description: "Large pothole on Main St".to_string(),
        category: Category::Infrastructure,
        location: "Main St, Y, X, India".to_string(),
        tracking_id,
        user_id,
    }
}

#[sqlx::test]
async fn test_create_applies_defaults(pool: PgPool) {
    let user_id = seed_user(&pool, "filer").await;
    let complaint = ComplaintRepo::create(&pool, &complaint_input(user_id, generate_tracking_id()))
        .await
        .unwrap();

    assert_eq!(complaint.status, Status::Pending);
    assert_eq!(complaint.priority, Priority::Medium);
    assert_eq!(complaint.category, Category::Infrastructure);
    assert_eq!(complaint.user_id, Some(user_id));
}

#[sqlx::test]
async fn test_duplicate_tracking_id_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "filer").await;
    let tracking_id = generate_tracking_id();

    ComplaintRepo::create(&pool, &complaint_input(user_id, tracking_id.clone()))
        .await
        .unwrap();

    let err = ComplaintRepo::create(&pool, &complaint_input(user_id, tracking_id))
        .await
        .expect_err("second insert with the same tracking id must fail");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_complaints_tracking_id"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_lists_are_newest_first(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let other = seed_user(&pool, "other").await;

    let first = ComplaintRepo::create(&pool, &complaint_input(owner, generate_tracking_id()))
        .await
        .unwrap();
    let second = ComplaintRepo::create(&pool, &complaint_input(owner, generate_tracking_id()))
        .await
        .unwrap();
    ComplaintRepo::create(&pool, &complaint_input(other, generate_tracking_id()))
        .await
        .unwrap();

    let mine = ComplaintRepo::list_for_user(&pool, owner).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, second.id, "newest complaint comes first");
    assert_eq!(mine[1].id, first.id);

    let all = ComplaintRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[sqlx::test]
async fn test_update_status_refreshes_timestamp(pool: PgPool) {
    let user_id = seed_user(&pool, "filer").await;
    let complaint = ComplaintRepo::create(&pool, &complaint_input(user_id, generate_tracking_id()))
        .await
        .unwrap();

    let updated = ComplaintRepo::update_status(&pool, complaint.id, Status::Processing)
        .await
        .unwrap()
        .expect("complaint exists");

    assert_eq!(updated.status, Status::Processing);
    assert!(
        updated.updated_at > complaint.updated_at,
        "updated_at must be refreshed on status change"
    );
    // Tracking id is immutable across updates.
    assert_eq!(updated.tracking_id, complaint.tracking_id);
}

#[sqlx::test]
async fn test_update_status_unknown_id(pool: PgPool) {
    let result = ComplaintRepo::update_status(&pool, 999_999, Status::Resolved)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn test_find_by_tracking_id(pool: PgPool) {
    let user_id = seed_user(&pool, "filer").await;
    let tracking_id = generate_tracking_id();
    ComplaintRepo::create(&pool, &complaint_input(user_id, tracking_id.clone()))
        .await
        .unwrap();

    let found = ComplaintRepo::find_by_tracking_id(&pool, &tracking_id)
        .await
        .unwrap();
    assert!(found.is_some());

    let missing = ComplaintRepo::find_by_tracking_id(&pool, "GRV-NOPE-ABCDE")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_comments_append_in_order(pool: PgPool) {
    let user_id = seed_user(&pool, "filer").await;
    let complaint = ComplaintRepo::create(&pool, &complaint_input(user_id, generate_tracking_id()))
        .await
        .unwrap();

    ComplaintRepo::add_comment(&pool, complaint.id, user_id, Role::Citizen, "first")
        .await
        .unwrap();
    ComplaintRepo::add_comment(&pool, complaint.id, user_id, Role::Officer, "second")
        .await
        .unwrap();

    let comments = ComplaintRepo::list_comments(&pool, complaint.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "first");
    assert_eq!(comments[1].body, "second");
    assert_eq!(comments[1].author_role, Role::Officer);
}

#[sqlx::test]
async fn test_deleting_filer_orphans_complaint(pool: PgPool) {
    let user_id = seed_user(&pool, "leaver").await;
    let complaint = ComplaintRepo::create(&pool, &complaint_input(user_id, generate_tracking_id()))
        .await
        .unwrap();

    UserRepo::delete(&pool, user_id).await.unwrap();

    let survivor = ComplaintRepo::find_by_id(&pool, complaint.id)
        .await
        .unwrap()
        .expect("complaints survive account deletion");
    assert_eq!(survivor.user_id, None);
}
