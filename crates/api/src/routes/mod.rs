pub mod auth;
pub mod health;
pub mod sprint;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      start OAuth login (public)
/// /auth/basic-login                                password login (public)
/// /auth/callback                                   OAuth callback (public)
/// /auth/logout                                     logout (requires session)
///
/// /retros/{retro_id}/sprints                       list, create
/// /retros/{retro_id}/sprints/{id}                  get, update, delete
/// /retros/{retro_id}/sprints/{id}/activate         draft -> active (POST)
/// /retros/{retro_id}/sprints/{id}/freeze           active -> frozen (POST)
/// /retros/{retro_id}/sprints/{id}/process          trigger worker refresh (POST)
/// /retros/{retro_id}/sprints/{id}/member-summary   per-member contributions
/// /retros/{retro_id}/sprints/{id}/process-history  sprint audit trail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/retros/{retro_id}/sprints", sprint::router())
}
