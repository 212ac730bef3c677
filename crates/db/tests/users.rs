//! CRUD tests for the users repository.

use nivaran_core::roles::Role;
use nivaran_db::models::user::CreateUser;
use nivaran_db::repositories::UserRepo;
use sqlx::PgPool;

fn citizen_input(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        display_name: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "$argon2id$fake-hash-for-tests".to_string(),
        age: 30,
        role: Role::Citizen,
    }
}

#[sqlx::test]
async fn test_create_and_find_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &citizen_input("alice"))
        .await
        .expect("user creation should succeed");

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@test.com");
    assert_eq!(user.role, Role::Citizen);

    let by_id = UserRepo::find_by_id(&pool, user.id).await.unwrap();
    assert!(by_id.is_some());

    let by_email = UserRepo::find_by_email(&pool, "alice@test.com")
        .await
        .unwrap();
    assert_eq!(by_email.unwrap().id, user.id);
}

#[sqlx::test]
async fn test_duplicate_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &citizen_input("bob")).await.unwrap();

    let mut duplicate = citizen_input("bobby");
    duplicate.email = "bob@test.com".to_string();

    let err = UserRepo::create(&pool, &duplicate)
        .await
        .expect_err("duplicate email must violate uq_users_email");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_count_and_list_by_role(pool: PgPool) {
    for name in ["c1", "c2"] {
        UserRepo::create(&pool, &citizen_input(name)).await.unwrap();
    }
    let mut officer = citizen_input("officer1");
    officer.role = Role::Officer;
    UserRepo::create(&pool, &officer).await.unwrap();

    assert_eq!(UserRepo::count_by_role(&pool, Role::Citizen).await.unwrap(), 2);
    assert_eq!(UserRepo::count_by_role(&pool, Role::Officer).await.unwrap(), 1);
    assert_eq!(UserRepo::count_by_role(&pool, Role::Admin).await.unwrap(), 0);

    let officers = UserRepo::list_by_role(&pool, Role::Officer).await.unwrap();
    assert_eq!(officers.len(), 1);
    assert_eq!(officers[0].username, "officer1");
}

#[sqlx::test]
async fn test_delete_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &citizen_input("gone")).await.unwrap();

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());

    // Deleting again is a no-op.
    assert!(!UserRepo::delete(&pool, user.id).await.unwrap());
}
