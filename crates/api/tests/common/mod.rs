//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router (with the production middleware
//! stack) on top of a per-test database pool, and provides small
//! request/response helpers around `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderName, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use nivaran_api::auth::jwt::AuthConfig;
use nivaran_api::auth::password::hash_password;
use nivaran_api::config::ServerConfig;
use nivaran_api::routes;
use nivaran_api::state::AppState;
use nivaran_classifier::Classifier;
use nivaran_core::roles::Role;
use nivaran_db::models::user::{CreateUser, User};
use nivaran_db::repositories::UserRepo;

/// Plaintext password used for all directly-created test users.
pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a fixed session secret and leaves status-transition enforcement
/// off (the production default).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        enforce_status_transitions: false,
        auth: AuthConfig {
            secret: "integration-test-secret".to_string(),
            session_expiry_days: 1,
            remember_expiry_days: 30,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a disabled classifier.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The classifier runs in disabled
/// mode, so filed complaints land in OTHER with empty scheme info.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied configuration, for
/// tests that flip `enforce_status_transitions`.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
        classifier: Arc::new(Classifier::disabled()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::app_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with no credentials.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request carrying a session cookie.
pub async fn get_auth(app: Router, path: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and no credentials.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a session cookie.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// Extract the session cookie pair (`session=<token>`) from a response's
/// `Set-Cookie` header, for replay in subsequent requests.
pub fn session_cookie_from(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(SET_COOKIE)
        .expect("response must carry a Set-Cookie header")
        .to_str()
        .expect("Set-Cookie must be valid ASCII");
    raw.split(';')
        .next()
        .expect("Set-Cookie must have at least one attribute")
        .to_string()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str, role: Role) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        display_name: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        age: 30,
        role,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log a directly-created user in via the API and return their session
/// cookie pair.
pub async fn login_as(app: Router, username: &str) -> String {
    let body = serde_json::json!({
        "email": format!("{username}@test.com"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_from(&response)
}

/// Create a user and log them in, returning `(user, cookie)`.
pub async fn login_new_user(pool: &PgPool, app: Router, username: &str, role: Role) -> (User, String) {
    let user = create_test_user(pool, username, role).await;
    let cookie = login_as(app, username).await;
    (user, cookie)
}
