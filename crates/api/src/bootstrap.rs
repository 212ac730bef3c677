//! One-time default-admin bootstrap, run at startup after the store
//! connects.

use nivaran_core::roles::Role;
use nivaran_db::models::user::CreateUser;
use nivaran_db::repositories::UserRepo;
use nivaran_db::DbPool;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::auth::password::hash_password;
use crate::error::AppResult;

/// Fallback bootstrap admin email when `BOOTSTRAP_ADMIN_EMAIL` is unset.
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Length of the generated bootstrap password.
const GENERATED_PASSWORD_LEN: usize = 16;

/// Create the default admin account if no ADMIN exists yet.
///
/// Idempotent: running startup twice against a store that already has an
/// admin creates nothing. The credential comes from
/// `BOOTSTRAP_ADMIN_EMAIL` / `BOOTSTRAP_ADMIN_PASSWORD`; when the password
/// is unset a random one is generated and logged exactly once, and must be
/// rotated after first login.
pub async fn ensure_default_admin(pool: &DbPool) -> AppResult<()> {
    let admin_count = UserRepo::count_by_role(pool, Role::Admin).await?;
    if admin_count > 0 {
        tracing::info!(admin_count, "Admin account already exists, skipping bootstrap");
        return Ok(());
    }

    let email =
        std::env::var("BOOTSTRAP_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.into());

    let (password, generated) = match std::env::var("BOOTSTRAP_ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, false),
        _ => (generate_password(), true),
    };

    let hashed = hash_password(&password)?;

    let input = CreateUser {
        username: "admin".to_string(),
        display_name: "Administrator".to_string(),
        email: email.clone(),
        password_hash: hashed,
        age: 30,
        role: Role::Admin,
    };
    let admin = UserRepo::create(pool, &input).await?;

    if generated {
        // The only place the generated credential is ever visible.
        tracing::warn!(
            admin_id = admin.id,
            email = %email,
            password = %password,
            "Default admin account created with a generated password; rotate it after first login"
        );
    } else {
        tracing::info!(
            admin_id = admin.id,
            email = %email,
            "Default admin account created from BOOTSTRAP_ADMIN_PASSWORD"
        );
    }

    Ok(())
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LEN);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
