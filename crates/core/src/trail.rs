//! Audit-trail vocabulary.
//!
//! Action and subject names are fixed strings, one per operation. The trail
//! is write-only from the core's point of view; these constants exist so
//! every emitter and the `process_history` read agree on spelling.

use serde::Serialize;

use crate::types::DbId;

/// Subject ("action item") types recorded in trails.
pub mod subject {
    pub const SPRINT: &str = "Sprint";
}

/// Action types recorded in trails, fixed per operation.
pub mod action {
    pub const CREATED_SPRINT: &str = "CreatedSprint";
    pub const UPDATED_SPRINT: &str = "UpdatedSprint";
    pub const DELETED_SPRINT: &str = "DeletedSprint";
    pub const ACTIVATED_SPRINT: &str = "ActivatedSprint";
    pub const FREEZE_SPRINT: &str = "FreezeSprint";
    pub const TRIGGERED_SPRINT_REFRESH: &str = "TriggeredSprintRefresh";
}

/// A single audit event handed to the trail recorder after a state-changing
/// operation succeeds.
#[derive(Debug, Clone, Serialize)]
pub struct TrailEvent {
    /// One of the [`action`] constants.
    pub action_type: &'static str,
    /// One of the [`subject`] constants.
    pub action_item_type: &'static str,
    /// ID of the subject the action was taken on.
    pub action_item_id: DbId,
    /// ID of the user who performed the action.
    pub actor_id: DbId,
}

impl TrailEvent {
    /// Event for an action taken on a sprint.
    pub fn sprint(action_type: &'static str, sprint_id: DbId, actor_id: DbId) -> Self {
        TrailEvent {
            action_type,
            action_item_type: subject::SPRINT,
            action_item_id: sprint_id,
            actor_id,
        }
    }
}
