//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /login        -> login_start
/// POST /basic-login  -> basic_login
/// GET  /callback     -> oauth_callback
/// POST /logout       -> logout (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_start))
        .route("/basic-login", post(auth::basic_login))
        .route("/callback", get(auth::oauth_callback))
        .route("/logout", post(auth::logout))
}
