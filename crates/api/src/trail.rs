//! Best-effort audit trail recorder.

use retroflect_core::trail::TrailEvent;
use retroflect_db::repositories::TrailRepo;
use retroflect_db::DbPool;

/// Record a trail event after a successful state-changing operation.
///
/// Emission is best-effort: a failed insert is logged and swallowed. It
/// must never roll back or block the primary operation.
pub async fn record(pool: &DbPool, event: TrailEvent) {
    if let Err(err) = TrailRepo::add(pool, &event).await {
        tracing::error!(
            error = %err,
            action = event.action_type,
            item_id = event.action_item_id,
            actor_id = event.actor_id,
            "failed to record trail entry"
        );
    }
}
