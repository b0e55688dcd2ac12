//! `FitnessStore` trait and reqwest-based client for the fitness tracker
//! REST backend.
//!
//! The backend owns persistence and users; this crate only moves records
//! across the wire. Domain rules (goal validation, progress, aggregation)
//! live in `fitness_core` — wire snapshots are converted through the core's
//! validation before anything trusts them.

use async_trait::async_trait;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fitness_core::{ActivityRecord, Goal, GoalDraft, TrackerError, WorkoutRecord};

pub mod config;
pub mod http_client;
pub mod retry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("domain validation failed: {0}")]
    Domain(#[from] TrackerError),
}

/// Goal snapshot as the backend stores it: enum fields as strings, window as
/// two dates, and a persisted `completed` flag.
///
/// The stored flag is write-only from our side: [`GoalRecord::into_goal`]
/// ignores it (completion is re-derived by the core) and
/// [`GoalRecord::from_goal`] recomputes it for persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub category: String,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl GoalRecord {
    /// Validate a wire snapshot into a domain goal. The stored progress is
    /// re-applied through the core so `InvalidProgress` surfaces here too.
    pub fn into_goal(self) -> Result<Goal, TrackerError> {
        let draft = GoalDraft {
            goal_type: self.goal_type,
            category: self.category,
            target_value: self.target_value,
            start_date: self.start_date,
            end_date: Some(self.end_date),
        };
        let goal = draft.into_goal()?;
        let goal = Goal {
            id: self.id,
            ..goal
        };
        goal.apply_progress(self.current_value)
    }

    /// Serialize a domain goal for persistence, recomputing the stored
    /// completion flag.
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            goal_type: goal.goal_type.as_str().to_string(),
            category: goal.category.as_str().to_string(),
            target_value: goal.target_value,
            current_value: goal.current_value,
            start_date: goal.window.start,
            end_date: goal.window.end,
            completed: goal.completed(),
        }
    }
}

#[async_trait]
pub trait FitnessStore: Send + Sync + 'static {
    // === Activities ===
    async fn get_activities(&self) -> Result<Vec<ActivityRecord>, StoreError>;
    async fn get_today_activity(&self) -> Result<Option<ActivityRecord>, StoreError>;
    async fn create_activity(&self, record: &ActivityRecord) -> Result<ActivityRecord, StoreError>;

    // === Workouts ===
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, StoreError>;
    async fn get_workouts_by_date(&self, date: NaiveDate) -> Result<Vec<WorkoutRecord>, StoreError>;
    async fn create_workout(&self, record: &WorkoutRecord) -> Result<WorkoutRecord, StoreError>;
    async fn update_workout(
        &self,
        workout_id: i64,
        record: &WorkoutRecord,
    ) -> Result<WorkoutRecord, StoreError>;
    async fn delete_workout(&self, workout_id: i64) -> Result<(), StoreError>;

    // === Goals ===
    async fn get_goals(&self) -> Result<Vec<GoalRecord>, StoreError>;
    async fn get_active_goals(&self) -> Result<Vec<GoalRecord>, StoreError>;
    async fn create_goal(&self, record: &GoalRecord) -> Result<GoalRecord, StoreError>;
    async fn update_goal(
        &self,
        goal_id: i64,
        record: &GoalRecord,
    ) -> Result<GoalRecord, StoreError>;
    async fn update_goal_progress(
        &self,
        goal_id: i64,
        progress: f64,
    ) -> Result<GoalRecord, StoreError>;
    async fn delete_goal(&self, goal_id: i64) -> Result<(), StoreError>;

    /// Fetch all goal records and validate them into domain snapshots.
    /// A record the core rejects surfaces as [`StoreError::Domain`].
    async fn get_goal_snapshots(&self) -> Result<Vec<Goal>, StoreError> {
        self.get_goals()
            .await?
            .into_iter()
            .map(|record| record.into_goal().map_err(StoreError::from))
            .collect()
    }
}
