//! Session-cookie plumbing: the cookie name, Set-Cookie construction, and
//! extraction of the token from request headers.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Build the `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_secs}")
}

/// The `Set-Cookie` value that discards the session cookie.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

/// Extract the session token from the request's `Cookie` header(s).
///
/// Returns `None` when no `session` cookie is present. An empty value is
/// returned as `Some("")` so the caller can treat it like a missing token.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, token) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| token.to_string())
        })
        .next()
}
