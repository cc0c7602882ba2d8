use std::sync::Arc;

use crate::auth::oauth::GoogleOAuthClient;
use crate::config::ServerConfig;
use crate::queue::SprintQueue;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: retroflect_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Google OAuth client, built once at startup from injected config.
    pub oauth: Arc<GoogleOAuthClient>,
    /// Fire-and-forget client for the external sprint sync worker.
    pub queue: Arc<SprintQueue>,
}
