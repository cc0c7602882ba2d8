//! Retrospective entity model and membership rows.

use retroflect_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full retrospective row from the `retrospectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Retrospective {
    pub id: DbId,
    pub title: String,
    pub created_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Membership row linking a user to a retrospective.
#[derive(Debug, Clone, FromRow)]
pub struct RetrospectiveMember {
    pub id: DbId,
    pub retrospective_id: DbId,
    pub user_id: DbId,
    /// `member` or `admin`.
    pub role: String,
    pub created_at: Timestamp,
}

/// Well-known membership role names.
pub const ROLE_MEMBER: &str = "member";
pub const ROLE_ADMIN: &str = "admin";
