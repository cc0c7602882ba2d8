//! Sprint lifecycle state machine.
//!
//! A sprint moves `Draft -> Active -> Frozen`, one direction only, and
//! nothing leaves `Frozen`. The transition rule lives here so both the
//! repository layer (conditional UPDATEs) and the handlers agree on what is
//! legal; the database never sees a transition this module rejects.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a sprint.
///
/// Serialized as lowercase strings (`"draft"`, `"active"`, `"frozen"`),
/// matching the `status` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    Draft,
    Active,
    Frozen,
}

impl SprintStatus {
    /// Column value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            SprintStatus::Draft => "draft",
            SprintStatus::Active => "active",
            SprintStatus::Frozen => "frozen",
        }
    }

    /// Parse a `status` column value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "draft" => Ok(SprintStatus::Draft),
            "active" => Ok(SprintStatus::Active),
            "frozen" => Ok(SprintStatus::Frozen),
            other => Err(CoreError::Internal(format!(
                "unknown sprint status '{other}' in database"
            ))),
        }
    }

    /// Whether a direct transition from `self` to `next` is legal.
    pub fn can_transition_to(self, next: SprintStatus) -> bool {
        matches!(
            (self, next),
            (SprintStatus::Draft, SprintStatus::Active)
                | (SprintStatus::Active, SprintStatus::Frozen)
        )
    }

    /// Whether the sprint's fields may still be updated.
    ///
    /// Frozen sprints are immutable; draft and active sprints stay editable.
    pub fn is_mutable(self) -> bool {
        !matches!(self, SprintStatus::Frozen)
    }

    /// Whether the sprint may be deleted. Only drafts can be removed; once a
    /// sprint has been activated its history must survive.
    pub fn is_deletable(self) -> bool {
        matches!(self, SprintStatus::Draft)
    }
}

impl std::fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
