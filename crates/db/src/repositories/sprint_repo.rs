//! Repository for the `sprints` and `sprint_members` tables.
//!
//! Lifecycle transitions use conditional UPDATEs keyed on the expected
//! pre-state, so two concurrent activate (or freeze) requests cannot both
//! succeed and a lost update cannot push a sprint into a state the
//! [`SprintStatus`](retroflect_core::sprint::SprintStatus) machine forbids.

use chrono::NaiveDate;
use retroflect_core::sprint::SprintStatus;
use retroflect_core::types::DbId;
use sqlx::PgPool;

use crate::models::sprint::{CreateSprint, Sprint, SprintMemberSummary, UpdateSprint};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, retrospective_id, title, status, start_date, end_date, \
                        created_by_id, created_at, updated_at";

/// Provides CRUD and lifecycle operations for sprints.
pub struct SprintRepo;

impl SprintRepo {
    /// Insert a new sprint. Sprints are always created in `draft`.
    pub async fn create(
        pool: &PgPool,
        retro_id: DbId,
        created_by_id: DbId,
        input: &CreateSprint,
    ) -> Result<Sprint, sqlx::Error> {
        let query = format!(
            "INSERT INTO sprints (retrospective_id, title, start_date, end_date, created_by_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(retro_id)
            .bind(&input.title)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(created_by_id)
            .fetch_one(pool)
            .await
    }

    /// Find a sprint by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sprints WHERE id = $1");
        sqlx::query_as::<_, Sprint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a sprint by ID, scoped to its owning retrospective.
    pub async fn find_in_retro(
        pool: &PgPool,
        id: DbId,
        retro_id: DbId,
    ) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sprints WHERE id = $1 AND retrospective_id = $2"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(id)
            .bind(retro_id)
            .fetch_optional(pool)
            .await
    }

    /// List a retrospective's sprints, newest start date first.
    ///
    /// `after` is an exclusive start-date cursor for pagination.
    pub async fn list(
        pool: &PgPool,
        retro_id: DbId,
        limit: i64,
        after: Option<NaiveDate>,
    ) -> Result<Vec<Sprint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sprints
             WHERE retrospective_id = $1
               AND ($2::DATE IS NULL OR start_date < $2)
             ORDER BY start_date DESC NULLS LAST, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(retro_id)
            .bind(after)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a sprint's fields. Only non-`None` fields are applied, and
    /// frozen sprints are never touched.
    ///
    /// Returns `None` if the sprint is missing or frozen.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSprint,
    ) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!(
            "UPDATE sprints SET
                title = COALESCE($2, title),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                updated_at = NOW()
             WHERE id = $1 AND status <> 'frozen'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a sprint, permitted only while it is still a draft.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_draft(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sprints WHERE id = $1 AND status = 'draft'")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition a sprint from `from` to `to`, conditional on the current
    /// status matching `from`.
    ///
    /// Returns `true` only when this call observed the transition; a stale
    /// pre-state (double submission, concurrent request) yields `false` and
    /// leaves the row untouched.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        retro_id: DbId,
        from: SprintStatus,
        to: SprintStatus,
    ) -> Result<bool, sqlx::Error> {
        debug_assert!(from.can_transition_to(to));
        let result = sqlx::query(
            "UPDATE sprints SET status = $4, updated_at = NOW()
             WHERE id = $1 AND retrospective_id = $2 AND status = $3",
        )
        .bind(id)
        .bind(retro_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a member allocation to a sprint. Used by seeding and tests; the
    /// external sync worker maintains these rows in production.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_member(
        pool: &PgPool,
        sprint_id: DbId,
        user_id: DbId,
        allocation_percent: f32,
        expected_velocity: f32,
        points_earned: f32,
        time_spent_minutes: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sprint_members
                (sprint_id, user_id, allocation_percent, expected_velocity,
                 points_earned, time_spent_minutes)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(sprint_id)
        .bind(user_id)
        .bind(allocation_percent)
        .bind(expected_velocity)
        .bind(points_earned)
        .bind(time_spent_minutes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Per-member contribution summary for a sprint.
    pub async fn member_summary(
        pool: &PgPool,
        sprint_id: DbId,
    ) -> Result<Vec<SprintMemberSummary>, sqlx::Error> {
        sqlx::query_as::<_, SprintMemberSummary>(
            "SELECT sm.user_id, u.first_name, u.last_name,
                    sm.allocation_percent, sm.expected_velocity,
                    sm.points_earned, sm.time_spent_minutes
             FROM sprint_members sm
             JOIN users u ON u.id = sm.user_id
             WHERE sm.sprint_id = $1
             ORDER BY u.first_name, u.last_name",
        )
        .bind(sprint_id)
        .fetch_all(pool)
        .await
    }
}
