//! Integration tests for the default-admin bootstrap.

mod common;

use nivaran_api::bootstrap::ensure_default_admin;
use nivaran_core::roles::Role;
use nivaran_db::repositories::UserRepo;
use sqlx::PgPool;

/// Bootstrap creates exactly one admin and is idempotent across restarts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_bootstrap_is_idempotent(pool: PgPool) {
    ensure_default_admin(&pool).await.expect("bootstrap should succeed");
    ensure_default_admin(&pool).await.expect("second bootstrap should succeed");

    let admin_count = UserRepo::count_by_role(&pool, Role::Admin).await.unwrap();
    assert_eq!(admin_count, 1);
}

/// Bootstrap is skipped when any admin already exists, whatever their email.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_bootstrap_skipped_with_existing_admin(pool: PgPool) {
    common::create_test_user(&pool, "incumbent", Role::Admin).await;

    ensure_default_admin(&pool).await.expect("bootstrap should succeed");

    let admin_count = UserRepo::count_by_role(&pool, Role::Admin).await.unwrap();
    assert_eq!(admin_count, 1);
}
