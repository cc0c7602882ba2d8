//! Per-request permission checks for retrospectives and sprints.
//!
//! Every check is computed fresh from the membership store on each call --
//! nothing is cached, and any lookup error denies (false-closed) after
//! being logged. Edit is a strict subset of access: a user who can edit a
//! sprint can always access it.

use retroflect_core::types::DbId;
use retroflect_db::models::retrospective::ROLE_ADMIN;
use retroflect_db::repositories::{RetroRepo, SprintRepo};
use retroflect_db::DbPool;

/// Whether the user has any membership in the retrospective.
pub async fn can_access_retro(pool: &DbPool, retro_id: DbId, user_id: DbId) -> bool {
    match RetroRepo::find_membership(pool, retro_id, user_id).await {
        Ok(membership) => membership.is_some(),
        Err(err) => {
            tracing::error!(error = %err, retro_id, user_id, "membership lookup failed, denying");
            false
        }
    }
}

/// Whether the sprint belongs to the retrospective and the user can access
/// the retrospective.
pub async fn can_access_sprint(
    pool: &DbPool,
    retro_id: DbId,
    sprint_id: DbId,
    user_id: DbId,
) -> bool {
    if !can_access_retro(pool, retro_id, user_id).await {
        return false;
    }
    match SprintRepo::find_in_retro(pool, sprint_id, retro_id).await {
        Ok(sprint) => sprint.is_some(),
        Err(err) => {
            tracing::error!(error = %err, sprint_id, retro_id, user_id, "sprint lookup failed, denying");
            false
        }
    }
}

/// Whether the user may mutate the sprint: its creator, or an `admin`
/// member of the owning retrospective. Strictly narrower than
/// [`can_access_sprint`].
pub async fn can_edit_sprint(
    pool: &DbPool,
    retro_id: DbId,
    sprint_id: DbId,
    user_id: DbId,
) -> bool {
    let membership = match RetroRepo::find_membership(pool, retro_id, user_id).await {
        Ok(Some(membership)) => membership,
        Ok(None) => return false,
        Err(err) => {
            tracing::error!(error = %err, retro_id, user_id, "membership lookup failed, denying");
            return false;
        }
    };

    match SprintRepo::find_in_retro(pool, sprint_id, retro_id).await {
        Ok(Some(sprint)) => sprint.created_by_id == user_id || membership.role == ROLE_ADMIN,
        Ok(None) => false,
        Err(err) => {
            tracing::error!(error = %err, sprint_id, retro_id, user_id, "sprint lookup failed, denying");
            false
        }
    }
}
