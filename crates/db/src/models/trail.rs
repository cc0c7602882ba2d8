//! Audit trail entity model.

use retroflect_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single trail row. Immutable once created (no updated_at).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trail {
    pub id: DbId,
    pub action_type: String,
    pub action_item_type: String,
    pub action_item_id: DbId,
    pub actor_id: DbId,
    pub created_at: Timestamp,
}
