//! Route definitions for sprints, nested under their owning retrospective.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sprint;
use crate::state::AppState;

/// Routes mounted at `/retros/{retro_id}/sprints`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sprint::list).post(sprint::create))
        .route(
            "/{sprint_id}",
            get(sprint::get).put(sprint::update).delete(sprint::delete),
        )
        .route("/{sprint_id}/activate", post(sprint::activate))
        .route("/{sprint_id}/freeze", post(sprint::freeze))
        .route("/{sprint_id}/process", post(sprint::process))
        .route("/{sprint_id}/member-summary", get(sprint::member_summary))
        .route("/{sprint_id}/process-history", get(sprint::process_history))
}
