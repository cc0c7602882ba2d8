//! Repository for the append-only `trails` table.

use retroflect_core::trail::TrailEvent;
use retroflect_core::types::DbId;
use sqlx::PgPool;

use crate::models::trail::Trail;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, action_type, action_item_type, action_item_id, actor_id, created_at";

/// Write-sink (and one read path) for audit trails.
pub struct TrailRepo;

impl TrailRepo {
    /// Append a trail row for the given event.
    pub async fn add(pool: &PgPool, event: &TrailEvent) -> Result<Trail, sqlx::Error> {
        let query = format!(
            "INSERT INTO trails (action_type, action_item_type, action_item_id, actor_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trail>(&query)
            .bind(event.action_type)
            .bind(event.action_item_type)
            .bind(event.action_item_id)
            .bind(event.actor_id)
            .fetch_one(pool)
            .await
    }

    /// All trail rows for one subject, newest first.
    pub async fn list_for_item(
        pool: &PgPool,
        action_item_type: &str,
        action_item_id: DbId,
    ) -> Result<Vec<Trail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trails
             WHERE action_item_type = $1 AND action_item_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Trail>(&query)
            .bind(action_item_type)
            .bind(action_item_id)
            .fetch_all(pool)
            .await
    }
}
