//! HTTP-level tests for the auth endpoints: password login, session
//! resolution, logout, and the OAuth handshake's state handling.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, cookie_token, create_user, get, get_auth, post_auth, post_json,
    session_cookie, session_for,
};
use retroflect_api::auth::token::hash_token;
use retroflect_db::repositories::{SessionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Password login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_succeeds_with_correct_credentials(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/basic-login",
        json!({ "email": "alice@example.com", "password": "hunter2-but-longer" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    assert_eq!(body["id"], user.id);
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.len(), 64);

    // The session row is bound to the user and carries the issued token.
    let session = SessionRepo::find_by_token_hash(&pool, &hash_token(cookie_token(&cookie)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.user_id, Some(user.id));
    assert_eq!(session.auth_token.as_deref(), Some(token));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_rejects_wrong_password(pool: PgPool) {
    create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/basic-login",
        json!({ "email": "alice@example.com", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_rejects_unknown_email(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/basic-login",
        json!({ "email": "nobody@example.com", "password": "whatever" }),
    )
    .await;

    // Identical failure shape to a wrong password: no account enumeration.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_rejects_oauth_only_account(pool: PgPool) {
    // No stored digest: password auth must fail no matter the input.
    create_user(&pool, "oauth-only@example.com", None).await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/basic-login",
        json!({ "email": "oauth-only@example.com", "password": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_rejects_inactive_user(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;
    assert!(UserRepo::deactivate(&pool, user.id).await.unwrap());

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/basic-login",
        json!({ "email": "alice@example.com", "password": "hunter2-but-longer" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_rejects_soft_deleted_user(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;
    assert!(UserRepo::soft_delete(&pool, user.id).await.unwrap());

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/basic-login",
        json!({ "email": "alice@example.com", "password": "hunter2-but-longer" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_login_rejects_malformed_body(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/basic-login",
        json!({ "email": "alice@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Session resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_requires_session(pool: PgPool) {
    let response = post_auth(build_test_app(pool), "/api/v1/auth/logout", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_rejects_forged_cookie(pool: PgPool) {
    let response = post_auth(
        build_test_app(pool),
        "/api/v1/auth/logout",
        "retroflect_session=deadbeefdeadbeefdeadbeefdeadbeef",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn session_goes_stale_when_user_is_deactivated(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;
    let cookie = session_for(&pool, user.id).await;

    let response = post_auth(build_test_app(pool.clone()), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Re-bind the session (logout cleared it), then deactivate the user.
    let cookie = session_for(&pool, user.id).await;
    assert!(UserRepo::deactivate(&pool, user.id).await.unwrap());

    let response = post_auth(build_test_app(pool), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_the_session(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;
    let cookie = session_for(&pool, user.id).await;

    let response = post_auth(build_test_app(pool.clone()), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let session = SessionRepo::find_by_token_hash(&pool, &hash_token(cookie_token(&cookie)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.user_id, None);
    assert_eq!(session.auth_token, None);
    assert_eq!(session.oauth_state, None);

    // The cleared session no longer authenticates.
    let response = post_auth(build_test_app(pool), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// OAuth handshake
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_start_sets_cookie_and_stores_state(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/auth/login").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    let login_url = body["login_url"].as_str().unwrap();
    assert!(login_url.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    assert!(login_url.contains("client_id=test-client"));

    // The state in the URL matches the nonce persisted on the session.
    let state = login_url.split("state=").nth(1).unwrap();
    let session = SessionRepo::find_by_token_hash(&pool, &hash_token(cookie_token(&cookie)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.oauth_state.as_deref(), Some(state));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn callback_consumes_state_even_when_exchange_fails(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/auth/login").await;
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    let state = body["login_url"]
        .as_str()
        .unwrap()
        .split("state=")
        .nth(1)
        .unwrap()
        .to_string();

    // The token endpoint is unreachable in tests, so the exchange fails --
    // but the nonce must already be gone by then.
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/auth/callback?state={state}&code=fake-code"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "user not found");

    let session = SessionRepo::find_by_token_hash(&pool, &hash_token(cookie_token(&cookie)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.oauth_state, None);

    // A replay with the same (formerly valid) state is rejected outright.
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/auth/callback?state={state}&code=fake-code"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn callback_rejects_mismatched_state(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/auth/login").await;
    let cookie = session_cookie(&response);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/auth/callback?state=attacker-chosen&code=fake-code",
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "user not found");

    // Even a mismatched hit burns the stored nonce.
    let session = SessionRepo::find_by_token_hash(&pool, &hash_token(cookie_token(&cookie)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.oauth_state, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_callback_logs_the_session_out(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;
    let cookie = session_for(&pool, user.id).await;

    // A logged-in user who hits the callback with a bad state does not
    // just lose the nonce -- the whole session is reset.
    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/auth/callback?state=attacker-chosen&code=fake-code",
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let session = SessionRepo::find_by_token_hash(&pool, &hash_token(cookie_token(&cookie)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.user_id, None);
    assert_eq!(session.auth_token, None);

    let response = post_auth(build_test_app(pool), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_exchange_drops_the_bound_identity(pool: PgPool) {
    let user = create_user(&pool, "alice@example.com", Some("hunter2-but-longer")).await;
    let cookie = session_for(&pool, user.id).await;

    // Restart the OAuth flow on the already-logged-in session.
    let response = get_auth(build_test_app(pool.clone()), "/api/v1/auth/login", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let state = body["login_url"]
        .as_str()
        .unwrap()
        .split("state=")
        .nth(1)
        .unwrap()
        .to_string();

    // Correct state, but the token exchange fails: the previous login must
    // not survive the failed attempt.
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/auth/callback?state={state}&code=fake-code"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_auth(build_test_app(pool), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn callback_without_session_is_rejected(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        "/api/v1/auth/callback?state=anything&code=fake-code",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "user not found");
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_endpoint_is_public(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
