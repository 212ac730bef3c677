//! Password hashing and the account password policy.
//!
//! Hashes are Argon2id with a random per-password salt, stored in PHC
//! string format so the parameters travel with the hash. Everything here
//! speaks [`CoreError`]: policy violations are `Validation`, crypto-layer
//! failures are `Internal` and stay out of client responses.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use nivaran_core::error::CoreError;

/// Minimum password length, counted in characters, enforced on citizen
/// registration and officer provisioning.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check a candidate password against the account policy.
pub fn check_password_policy(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Hash a plaintext password, returning the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
///
/// A mismatch is `Ok(false)`; `Err` means the stored hash itself could not
/// be processed (corrupt row, unsupported parameters).
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CoreError::Internal(format!("Stored password hash is malformed: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}
