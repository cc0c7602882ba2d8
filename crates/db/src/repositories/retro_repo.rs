//! Repository for the `retrospectives` and `retrospective_members` tables.

use retroflect_core::types::DbId;
use sqlx::PgPool;

use crate::models::retrospective::{Retrospective, RetrospectiveMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, created_by_id, created_at, updated_at";

/// Membership column list.
const MEMBER_COLUMNS: &str = "id, retrospective_id, user_id, role, created_at";

/// Provides operations for retrospectives and their memberships.
pub struct RetroRepo;

impl RetroRepo {
    /// Insert a new retrospective, returning the created row.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        created_by_id: DbId,
    ) -> Result<Retrospective, sqlx::Error> {
        let query = format!(
            "INSERT INTO retrospectives (title, created_by_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Retrospective>(&query)
            .bind(title)
            .bind(created_by_id)
            .fetch_one(pool)
            .await
    }

    /// Add a user to a retrospective with the given role.
    pub async fn add_member(
        pool: &PgPool,
        retro_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<RetrospectiveMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO retrospective_members (retrospective_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, RetrospectiveMember>(&query)
            .bind(retro_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a user's membership in a retrospective, if any.
    pub async fn find_membership(
        pool: &PgPool,
        retro_id: DbId,
        user_id: DbId,
    ) -> Result<Option<RetrospectiveMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM retrospective_members
             WHERE retrospective_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, RetrospectiveMember>(&query)
            .bind(retro_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
