//! Session model and DTOs.

use retroflect_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// Keyed by the SHA-256 hash of the opaque cookie token; the plaintext never
/// touches the database. All three payload fields are nullable: a session is
/// created empty on first contact and populated as the login flow advances.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token_hash: String,
    /// Single-use CSRF nonce for the OAuth handshake.
    pub oauth_state: Option<String>,
    /// Identity bound by a successful login.
    pub user_id: Option<DbId>,
    /// Opaque login token, re-issued on every successful login.
    pub auth_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
