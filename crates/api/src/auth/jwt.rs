//! Session-token generation and validation.
//!
//! Session tokens are HS256-signed JWTs carried in a cookie. Every claim
//! except `exp` is optional on decode so that older or malformed tokens are
//! detected as a corrupt session instead of a deserialization failure.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nivaran_core::roles::Role;
use nivaran_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
///
/// The `Option` fields are always populated when this server issues a
/// token; they exist so that decoding a token from an older deployment
/// surfaces "claim missing" rather than an error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    #[serde(default)]
    pub sub: Option<DbId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
    /// Unique token identifier (UUID v4) for revocation / audit.
    #[serde(default)]
    pub jti: String,
}

/// Configuration for session-token generation and validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in days (default: 1).
    pub session_expiry_days: i64,
    /// Session lifetime in days when "remember me" is requested (default: 30).
    pub remember_expiry_days: i64,
}

/// Default session expiry in days.
const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 1;
/// Default "remember me" session expiry in days.
const DEFAULT_REMEMBER_EXPIRY_DAYS: i64 = 30;

impl AuthConfig {
    /// Load session-token configuration from environment variables.
    ///
    /// | Env Var                        | Required | Default |
    /// |--------------------------------|----------|---------|
    /// | `SESSION_SECRET`               | **yes**  | --      |
    /// | `SESSION_EXPIRY_DAYS`          | no       | `1`     |
    /// | `SESSION_REMEMBER_EXPIRY_DAYS` | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty. There is no
    /// built-in fallback secret on purpose.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let session_expiry_days: i64 = std::env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_DAYS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_DAYS must be a valid i64");

        let remember_expiry_days: i64 = std::env::var("SESSION_REMEMBER_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REMEMBER_EXPIRY_DAYS.to_string())
            .parse()
            .expect("SESSION_REMEMBER_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            session_expiry_days,
            remember_expiry_days,
        }
    }

    /// Session lifetime in seconds for a login with or without "remember me".
    pub fn session_lifetime_secs(&self, remember: bool) -> i64 {
        let days = if remember {
            self.remember_expiry_days
        } else {
            self.session_expiry_days
        };
        days * 24 * 60 * 60
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: DbId,
    email: &str,
    role: Role,
    username: &str,
    remember: bool,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_lifetime_secs(remember);

    let claims = Claims {
        sub: Some(user_id),
        email: Some(email.to_string()),
        role: Some(role),
        username: Some(username.to_string()),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. A token that
/// verifies but lacks required claims is the caller's problem to reject.
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_days: 1,
            remember_expiry_days: 30,
        }
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let config = test_config();
        let token =
            generate_session_token(42, "a@x.com", Role::Admin, "alice", false, &config)
                .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, Some(42));
        assert_eq!(claims.email.as_deref(), Some("a@x.com"));
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.username.as_deref(), Some("alice"));
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_remember_me_extends_expiry() {
        let config = test_config();
        let short =
            generate_session_token(1, "a@x.com", Role::Citizen, "a", false, &config).unwrap();
        let long =
            generate_session_token(1, "a@x.com", Role::Citizen, "a", true, &config).unwrap();

        let short_exp = validate_token(&short, &config).unwrap().exp;
        let long_exp = validate_token(&long, &config).unwrap().exp;
        // 30 days vs 1 day, allow generous slack for the clock reads.
        assert!(long_exp - short_exp > 28 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Some(1),
            email: Some("a@x.com".to_string()),
            role: Some(Role::Citizen),
            username: Some("a".to_string()),
            exp: now - 300, // expired 5 minutes ago (well past leeway)
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_legacy_token_without_subject_decodes_with_none() {
        let config = test_config();

        // A token signed with the right secret but missing every claim
        // except exp, as an older deployment might have issued.
        let now = chrono::Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "exp": now + 3600 }),
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let claims = validate_token(&token, &config).expect("signature and exp are valid");
        assert_eq!(claims.sub, None, "missing subject must surface as None");
        assert_eq!(claims.role, None);
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = AuthConfig {
            secret: "secret-alpha".to_string(),
            session_expiry_days: 1,
            remember_expiry_days: 30,
        };
        let config_b = AuthConfig {
            secret: "secret-bravo".to_string(),
            session_expiry_days: 1,
            remember_expiry_days: 30,
        };

        let token = generate_session_token(1, "a@x.com", Role::Citizen, "a", false, &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }
}
