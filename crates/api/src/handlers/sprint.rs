//! Handlers for the `/retros/{retro_id}/sprints` resource.
//!
//! Reads require access to the sprint (membership in the owning retro);
//! mutations require edit (creator or retro admin) and are checked before
//! any side effect. Each successful mutation emits exactly one trail event
//! with its fixed action type.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use retroflect_core::error::CoreError;
use retroflect_core::sprint::SprintStatus;
use retroflect_core::trail::{action, subject, TrailEvent};
use retroflect_core::types::DbId;
use retroflect_db::models::sprint::{CreateSprint, Sprint, SprintMemberSummary, UpdateSprint};
use retroflect_db::models::trail::Trail;
use retroflect_db::repositories::{SprintRepo, TrailRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::permissions;
use crate::state::AppState;
use crate::trail;

/// Default page size for sprint listings.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard ceiling on requested page size.
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for `GET /retros/{retro_id}/sprints`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page size; values outside 1..=100 fall back to the default.
    pub count: Option<i64>,
    /// Exclusive start-date cursor.
    pub after: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/retros/{retro_id}/sprints
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(retro_id): Path<DbId>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Sprint>>> {
    if !permissions::can_access_retro(&state.pool, retro_id, user.user_id).await {
        return Err(forbidden());
    }

    let limit = match query.count {
        Some(count) if (1..=MAX_PAGE_SIZE).contains(&count) => count,
        _ => DEFAULT_PAGE_SIZE,
    };

    let sprints = SprintRepo::list(&state.pool, retro_id, limit, query.after).await?;
    Ok(Json(sprints))
}

/// POST /api/v1/retros/{retro_id}/sprints
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(retro_id): Path<DbId>,
    body: Result<Json<CreateSprint>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Sprint>)> {
    if !permissions::can_access_retro(&state.pool, retro_id, user.user_id).await {
        return Err(forbidden());
    }
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let sprint = SprintRepo::create(&state.pool, retro_id, user.user_id, &input).await?;

    trail::record(
        &state.pool,
        TrailEvent::sprint(action::CREATED_SPRINT, sprint.id, user.user_id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(sprint)))
}

/// GET /api/v1/retros/{retro_id}/sprints/{sprint_id}
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Sprint>> {
    if !permissions::can_access_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }

    let sprint = SprintRepo::find_in_retro(&state.pool, sprint_id, retro_id)
        .await?
        .ok_or(not_found(sprint_id))?;
    Ok(Json(sprint))
}

/// PUT /api/v1/retros/{retro_id}/sprints/{sprint_id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
    body: Result<Json<UpdateSprint>, JsonRejection>,
) -> AppResult<Json<Sprint>> {
    if !permissions::can_edit_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let current = SprintRepo::find_in_retro(&state.pool, sprint_id, retro_id)
        .await?
        .ok_or(not_found(sprint_id))?;
    if !current.status()?.is_mutable() {
        return Err(AppError::Core(CoreError::Conflict(
            "frozen sprints cannot be updated".into(),
        )));
    }

    // The UPDATE re-checks the frozen guard, so a concurrent freeze between
    // the read above and here still cannot touch the row.
    let sprint = SprintRepo::update(&state.pool, sprint_id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "frozen sprints cannot be updated".into(),
            ))
        })?;

    trail::record(
        &state.pool,
        TrailEvent::sprint(action::UPDATED_SPRINT, sprint_id, user.user_id),
    )
    .await;

    Ok(Json(sprint))
}

/// DELETE /api/v1/retros/{retro_id}/sprints/{sprint_id}
///
/// Only draft sprints can be deleted; an activated sprint's history must
/// survive.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !permissions::can_edit_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }

    let current = SprintRepo::find_in_retro(&state.pool, sprint_id, retro_id)
        .await?
        .ok_or(not_found(sprint_id))?;
    if !current.status()?.is_deletable() {
        return Err(AppError::Core(CoreError::Conflict(
            "only draft sprints can be deleted".into(),
        )));
    }

    if !SprintRepo::delete_draft(&state.pool, sprint_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "only draft sprints can be deleted".into(),
        )));
    }

    trail::record(
        &state.pool,
        TrailEvent::sprint(action::DELETED_SPRINT, sprint_id, user.user_id),
    )
    .await;

    Ok(StatusCode::OK)
}

/// POST /api/v1/retros/{retro_id}/sprints/{sprint_id}/activate
pub async fn activate(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    transition(
        &state,
        &user,
        retro_id,
        sprint_id,
        SprintStatus::Draft,
        SprintStatus::Active,
        action::ACTIVATED_SPRINT,
    )
    .await
}

/// POST /api/v1/retros/{retro_id}/sprints/{sprint_id}/freeze
pub async fn freeze(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    transition(
        &state,
        &user,
        retro_id,
        sprint_id,
        SprintStatus::Active,
        SprintStatus::Frozen,
        action::FREEZE_SPRINT,
    )
    .await
}

/// POST /api/v1/retros/{retro_id}/sprints/{sprint_id}/process
///
/// Ask the external worker to recompute the sprint's derived data. Does not
/// change status; the worker only gets the sprint id and an activity hint.
pub async fn process(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !permissions::can_access_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }

    let sprint = SprintRepo::find_in_retro(&state.pool, sprint_id, retro_id)
        .await?
        .ok_or(not_found(sprint_id))?;

    state
        .queue
        .notify(sprint_id, sprint.status()? == SprintStatus::Active);

    trail::record(
        &state.pool,
        TrailEvent::sprint(action::TRIGGERED_SPRINT_REFRESH, sprint_id, user.user_id),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/retros/{retro_id}/sprints/{sprint_id}/member-summary
pub async fn member_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<SprintMemberSummary>>> {
    if !permissions::can_access_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }

    let summary = SprintRepo::member_summary(&state.pool, sprint_id).await?;
    Ok(Json(summary))
}

/// GET /api/v1/retros/{retro_id}/sprints/{sprint_id}/process-history
pub async fn process_history(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((retro_id, sprint_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<Trail>>> {
    if !permissions::can_access_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }

    let trails = TrailRepo::list_for_item(&state.pool, subject::SPRINT, sprint_id).await?;
    Ok(Json(trails))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared edit-gated lifecycle transition: conditional update against the
/// expected pre-state, then a trail event. A stale pre-state (double
/// submission, concurrent request) is an explicit conflict, not a no-op.
async fn transition(
    state: &AppState,
    user: &CurrentUser,
    retro_id: DbId,
    sprint_id: DbId,
    from: SprintStatus,
    to: SprintStatus,
    action_type: &'static str,
) -> AppResult<StatusCode> {
    if !permissions::can_edit_sprint(&state.pool, retro_id, sprint_id, user.user_id).await {
        return Err(forbidden());
    }

    let transitioned =
        SprintRepo::transition(&state.pool, sprint_id, retro_id, from, to).await?;
    if !transitioned {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "sprint is not in the {from} state"
        ))));
    }

    trail::record(
        &state.pool,
        TrailEvent::sprint(action_type, sprint_id, user.user_id),
    )
    .await;

    Ok(StatusCode::OK)
}

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden(String::new()))
}

fn not_found(sprint_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Sprint",
        id: sprint_id,
    })
}
