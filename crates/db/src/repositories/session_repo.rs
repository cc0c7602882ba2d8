//! Repository for the `sessions` table.

use retroflect_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::Session;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token_hash, oauth_state, user_id, auth_token, \
                        created_at, updated_at";

/// Provides operations on server-side sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new empty session for the given token hash.
    pub async fn create(pool: &PgPool, token_hash: &str) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (token_hash)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a session by the hash of its cookie token.
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE token_hash = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Store the OAuth CSRF nonce on the session.
    pub async fn set_oauth_state(
        pool: &PgPool,
        id: DbId,
        state: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET oauth_state = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(state)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Atomically reset the session and return the OAuth CSRF nonce it held.
    ///
    /// A callback attempt logs the session out up front: user, token, and
    /// nonce are cleared in one statement and the prior nonce returned, so
    /// the identity must be re-bound on success and a failed attempt leaves
    /// nothing behind. The row lock in the CTE makes the nonce single-use
    /// even under concurrent callback hits: exactly one caller observes the
    /// value, everyone else gets `None`.
    pub async fn reset_and_take_oauth_state(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let state = sqlx::query_scalar::<_, Option<String>>(
            "WITH consumed AS (
                SELECT id, oauth_state FROM sessions WHERE id = $1 FOR UPDATE
             )
             UPDATE sessions
             SET oauth_state = NULL, user_id = NULL, auth_token = NULL,
                 updated_at = NOW()
             FROM consumed
             WHERE sessions.id = consumed.id
             RETURNING consumed.oauth_state",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(state.flatten())
    }

    /// Bind an authenticated identity and a freshly issued opaque token to
    /// the session.
    pub async fn bind_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        auth_token: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE sessions SET user_id = $2, auth_token = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(user_id)
        .bind(auth_token)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Clear every session field: user, token, and any pending OAuth state.
    pub async fn clear(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE sessions SET user_id = NULL, auth_token = NULL, oauth_state = NULL,
                    updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
