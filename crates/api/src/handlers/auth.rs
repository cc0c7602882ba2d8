//! Handlers for the `/auth` resource (OAuth login, password login, logout).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use retroflect_db::models::user::{User, UserResponse};
use retroflect_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult, INVALID_EMAIL_OR_PASSWORD, USER_NOT_FOUND};
use crate::middleware::auth::CurrentUser;
use crate::sessions;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/basic-login`.
#[derive(Debug, Deserialize)]
pub struct BasicLoginRequest {
    pub email: String,
    pub password: String,
}

/// Query parameters on the OAuth callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Response for `GET /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginStartResponse {
    pub login_url: String,
}

/// Successful authentication response for both login paths.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Opaque login token, re-issued on every successful login.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/login
///
/// Start the OAuth flow: store a fresh single-use state nonce in the
/// session and return the provider's authorization URL.
pub async fn login_start(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<LoginStartResponse>)> {
    let (session, jar) =
        sessions::load_or_create(&state.pool, jar, state.config.cookie_secure).await?;

    let nonce = generate_token();
    SessionRepo::set_oauth_state(&state.pool, session.id, &nonce).await?;

    let login_url = state.oauth.authorize_url(&nonce);
    Ok((jar, Json(LoginStartResponse { login_url })))
}

/// POST /api/v1/auth/basic-login
///
/// Authenticate with email + password. Returns 202 with the user payload
/// and a fresh opaque token. Unknown email, wrong password, and OAuth-only
/// accounts all fail identically.
pub async fn basic_login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<BasicLoginRequest>, JsonRejection>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = UserRepo::find_authenticable_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AppError::CredentialFailure(INVALID_EMAIL_OR_PASSWORD))?;

    if !verify_password(&input.password, user.password.as_deref()) {
        return Err(AppError::CredentialFailure(INVALID_EMAIL_OR_PASSWORD));
    }

    let (session, jar) =
        sessions::load_or_create(&state.pool, jar, state.config.cookie_secure).await?;
    let response = bind_login(&state, session.id, &user).await?;

    tracing::info!(user_id = user.id, "logged in user via password");
    Ok((StatusCode::ACCEPTED, jar, Json(response)))
}

/// GET /api/v1/auth/callback
///
/// Complete the OAuth flow. The session is reset before anything else --
/// the state nonce is consumed and any previously bound identity dropped --
/// so a replayed callback can never reuse the nonce and a failed attempt
/// leaves the caller logged out. Every failure mode maps to the same 404.
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let session = sessions::load(&state.pool, &jar)
        .await?
        .ok_or(AppError::CredentialFailure(USER_NOT_FOUND))?;

    // Logs the session out and consumes the nonce before any external
    // call, whatever happens next; success re-binds via `bind_login`.
    let expected = SessionRepo::reset_and_take_oauth_state(&state.pool, session.id).await?;

    match (&expected, &query.state) {
        (Some(expected), Some(returned)) if expected == returned => {}
        _ => {
            tracing::error!(
                session_id = session.id,
                "OAuth state mismatch (expected {:?}, got {:?})",
                expected,
                query.state
            );
            return Err(AppError::CredentialFailure(USER_NOT_FOUND));
        }
    }

    let code = query
        .code
        .ok_or(AppError::CredentialFailure(USER_NOT_FOUND))?;

    let access_token = state.oauth.exchange_code(&code).await.map_err(|err| {
        tracing::error!(error = %err, "OAuth code exchange failed");
        AppError::CredentialFailure(USER_NOT_FOUND)
    })?;

    let email = state.oauth.fetch_email(&access_token).await.map_err(|err| {
        tracing::error!(error = %err, "OAuth userinfo fetch failed");
        AppError::InternalError("OAuth userinfo fetch failed".into())
    })?;

    // Accounts are provisioned out-of-band; an unknown identity is not
    // auto-created.
    let user = UserRepo::find_authenticable_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::info!(%email, "OAuth identity has no provisioned account");
            AppError::CredentialFailure(USER_NOT_FOUND)
        })?;

    let response = bind_login(&state, session.id, &user).await?;

    tracing::info!(user_id = user.id, "logged in user via OAuth");
    Ok((jar, Json(response)))
}

/// POST /api/v1/auth/logout
///
/// Clear the session payload (user, token, pending OAuth state). Requires a
/// resolved session; the cookie itself survives.
pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> AppResult<StatusCode> {
    SessionRepo::clear(&state.pool, user.session_id).await?;
    tracing::info!(user_id = user.user_id, "logged out user");
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a fresh opaque token and bind identity + token to the session.
///
/// Re-issuing on every login invalidates any token value cached elsewhere.
async fn bind_login(state: &AppState, session_id: i64, user: &User) -> AppResult<AuthResponse> {
    let token = generate_token();
    SessionRepo::bind_user(&state.pool, session_id, user.id, &token).await?;
    Ok(AuthResponse {
        user: UserResponse::from(user),
        token,
    })
}
