//! Sprint entity model and DTOs.

use chrono::NaiveDate;
use retroflect_core::error::CoreError;
use retroflect_core::sprint::SprintStatus;
use retroflect_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full sprint row from the `sprints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sprint {
    pub id: DbId,
    pub retrospective_id: DbId,
    pub title: String,
    /// Raw `status` column value; use [`Sprint::status`] for the typed view.
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Sprint {
    /// Typed lifecycle status of this sprint.
    pub fn status(&self) -> Result<SprintStatus, CoreError> {
        SprintStatus::parse(&self.status)
    }
}

/// DTO for creating a new sprint. Sprints are always created in `draft`.
#[derive(Debug, Deserialize)]
pub struct CreateSprint {
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// DTO for updating an existing sprint. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateSprint {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Per-member contribution row for the member-summary read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SprintMemberSummary {
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub allocation_percent: f32,
    pub expected_velocity: f32,
    pub points_earned: f32,
    pub time_spent_minutes: i64,
}
