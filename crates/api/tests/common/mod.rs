//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! on top of a `#[sqlx::test]`-provided pool, plus small request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use retroflect_api::auth::oauth::{GoogleOAuthClient, GoogleOAuthConfig};
use retroflect_api::auth::token::{generate_token, hash_token};
use retroflect_api::config::ServerConfig;
use retroflect_api::queue::SprintQueue;
use retroflect_api::router::build_app_router;
use retroflect_api::sessions::SESSION_COOKIE;
use retroflect_api::state::AppState;
use retroflect_core::types::DbId;
use retroflect_db::models::user::{CreateUser, User};
use retroflect_db::repositories::{SessionRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// The OAuth token and userinfo endpoints point at an unroutable local port
/// so any attempted exchange fails fast without leaving the machine.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        oauth: GoogleOAuthConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "http://localhost:3000/api/v1/auth/callback".to_string(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "http://127.0.0.1:9/token".to_string(),
            userinfo_url: "http://127.0.0.1:9/userinfo".to_string(),
        },
        worker_url: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        oauth: Arc::new(GoogleOAuthClient::new(config.oauth.clone())),
        queue: Arc::new(SprintQueue::new(None)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a single request through the app, optionally with a JSON body and a
/// `Cookie` header.
pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    request(app, Method::GET, path, None, None).await
}

pub async fn get_auth(app: Router, path: &str, cookie: &str) -> Response<Body> {
    request(app, Method::GET, path, Some(cookie), None).await
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::POST, path, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request(app, Method::POST, path, Some(cookie), Some(body)).await
}

pub async fn post_auth(app: Router, path: &str, cookie: &str) -> Response<Body> {
    request(app, Method::POST, path, Some(cookie), None).await
}

pub async fn put_json_auth(
    app: Router,
    path: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request(app, Method::PUT, path, Some(cookie), Some(body)).await
}

pub async fn delete_auth(app: Router, path: &str, cookie: &str) -> Response<Body> {
    request(app, Method::DELETE, path, Some(cookie), None).await
}

/// Read and parse the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Extract the session cookie (`name=value`) from a response's
/// `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .expect("cookie header should be valid UTF-8");
    let pair = raw.split(';').next().expect("cookie should have a value");
    assert!(pair.starts_with(SESSION_COOKIE), "unexpected cookie: {pair}");
    pair.to_string()
}

/// The plaintext session key inside a `name=value` cookie pair.
pub fn cookie_token(cookie: &str) -> &str {
    cookie.split('=').nth(1).expect("cookie should have a value")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database. `password` of `None` provisions
/// an OAuth-only account.
pub async fn create_user(pool: &PgPool, email: &str, password: Option<&str>) -> User {
    let input = CreateUser {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password: password.map(retroflect_api::auth::password::encrypt_password),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a session already bound to the given user and return the cookie
/// header value to send with requests.
pub async fn session_for(pool: &PgPool, user_id: DbId) -> String {
    let token = generate_token();
    let session = SessionRepo::create(pool, &hash_token(&token))
        .await
        .expect("session creation should succeed");
    SessionRepo::bind_user(pool, session.id, user_id, &generate_token())
        .await
        .expect("session binding should succeed");
    format!("{SESSION_COOKIE}={token}")
}
