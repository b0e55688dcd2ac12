//! Goal lifecycle: window derivation, validation, and progress tracking.
//!
//! A [`Goal`] is an immutable snapshot. Operations either hand back a fresh
//! valid snapshot or an error with the original untouched; completion is a
//! computed fact (`current_value >= target_value`), never a stored flag, so
//! it can never drift from the values it is derived from.

use chrono::{Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::summary::{Period, PeriodSummary, workout_minutes};
use crate::{DateWindow, TrackerError, WorkoutRecord};

/// The metric a goal tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalCategory {
    Steps,
    Distance,
    Calories,
    WorkoutTime,
}

impl GoalCategory {
    /// Parse a category wire token (`STEPS`, `DISTANCE`, `CALORIES`,
    /// `WORKOUT_TIME`).
    pub fn parse(s: &str) -> Result<Self, TrackerError> {
        match s {
            "STEPS" => Ok(Self::Steps),
            "DISTANCE" => Ok(Self::Distance),
            "CALORIES" => Ok(Self::Calories),
            "WORKOUT_TIME" => Ok(Self::WorkoutTime),
            _ => Err(TrackerError::InvalidCategory(s.to_string())),
        }
    }

    /// The wire token, inverse of [`parse`](Self::parse).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Steps => "STEPS",
            Self::Distance => "DISTANCE",
            Self::Calories => "CALORIES",
            Self::WorkoutTime => "WORKOUT_TIME",
        }
    }

    /// The single category-to-metric dispatch. Steps, distance and calories
    /// read the activity summary totals; workout time sums workout
    /// durations inside the summary's window. Auto-tracking, when wired in,
    /// goes through here and nowhere else.
    pub fn metric_value(self, summary: &PeriodSummary, workouts: &[WorkoutRecord]) -> f64 {
        match self {
            Self::Steps => summary.total_steps as f64,
            Self::Distance => summary.total_distance_km,
            Self::Calories => summary.total_calories as f64,
            Self::WorkoutTime => workout_minutes(workouts, summary.window) as f64,
        }
    }
}

/// A validated goal snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub goal_type: Period,
    pub category: GoalCategory,
    pub target_value: f64,
    pub current_value: f64,
    pub window: DateWindow,
}

/// Raw goal input as the presentation layer hands it over: enum fields as
/// wire strings, end date optional. The only path into a [`Goal`] from
/// untrusted values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    #[serde(rename = "type")]
    pub goal_type: String,
    pub category: String,
    pub target_value: f64,
    pub start_date: NaiveDate,
    /// Explicit window override. Leave unset to derive the end date from the
    /// goal type; a type-changing edit must leave it unset so the window is
    /// re-derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Derive a goal's inclusive date window from its type.
///
/// An explicit end date wins when given, failing with `InvalidWindow` if it
/// precedes the start. Otherwise daily goals span the start day alone and
/// weekly goals the 7 days from the start.
pub fn derive_window(
    goal_type: Period,
    start: NaiveDate,
    explicit_end: Option<NaiveDate>,
) -> Result<DateWindow, TrackerError> {
    let end = match explicit_end {
        Some(end) if end < start => {
            return Err(TrackerError::InvalidWindow { start, end });
        }
        Some(end) => end,
        None => start + Duration::days(goal_type.span_days() - 1),
    };
    Ok(DateWindow { start, end })
}

fn check_target(target_value: f64) -> Result<(), TrackerError> {
    if !target_value.is_finite() || target_value <= 0.0 {
        return Err(TrackerError::InvalidTarget(target_value));
    }
    Ok(())
}

impl GoalDraft {
    /// Validate the draft into a new goal with zero progress.
    pub fn into_goal(self) -> Result<Goal, TrackerError> {
        let goal_type = Period::parse_goal_type(&self.goal_type)?;
        let category = GoalCategory::parse(&self.category)?;
        check_target(self.target_value)?;
        let window = derive_window(goal_type, self.start_date, self.end_date)?;
        Ok(Goal {
            id: None,
            goal_type,
            category,
            target_value: self.target_value,
            current_value: 0.0,
            window,
        })
    }
}

impl Goal {
    /// Whether the goal has been reached. Re-derived on every call, so the
    /// invariant `completed == (current_value >= target_value)` is total: a
    /// smaller progress value read back later reports the goal as open
    /// again rather than trusting a stale flag.
    pub fn completed(&self) -> bool {
        self.current_value >= self.target_value
    }

    /// Progress toward the target as a percentage, capped at 100.
    ///
    /// A non-positive target cannot occur on a validated goal but is
    /// guarded as 0% rather than dividing by it.
    pub fn percent_complete(&self) -> f64 {
        if self.target_value <= 0.0 {
            return 0.0;
        }
        (self.current_value / self.target_value * 100.0)
            .round()
            .clamp(0.0, 100.0)
    }

    /// Check the snapshot invariants (`target > 0`, `end >= start`) and hand
    /// the goal back. Snapshots deserialized from the store go through here
    /// before anything trusts them.
    pub fn validated(self) -> Result<Self, TrackerError> {
        check_target(self.target_value)?;
        if self.window.end < self.window.start {
            return Err(TrackerError::InvalidWindow {
                start: self.window.start,
                end: self.window.end,
            });
        }
        Ok(self)
    }

    /// Replace the stored progress with `progress` and return the updated
    /// snapshot. Absolute replacement, not an increment: a prompted value
    /// overwrites whatever was there. Overshoot past the target is kept.
    pub fn apply_progress(&self, progress: f64) -> Result<Self, TrackerError> {
        if !progress.is_finite() || progress < 0.0 {
            return Err(TrackerError::InvalidProgress(progress));
        }
        let updated = Self {
            current_value: progress,
            ..self.clone()
        };
        if updated.completed() && !self.completed() {
            tracing::debug!(goal_id = ?self.id, target = self.target_value, progress, "goal completed");
        }
        Ok(updated)
    }

    /// Apply a full edit, keeping identity and accumulated progress. The
    /// window is re-derived from the draft, so changing the type overwrites
    /// a previously derived end date.
    pub fn edited(&self, draft: GoalDraft) -> Result<Self, TrackerError> {
        let edited = draft.into_goal()?;
        Ok(Self {
            id: self.id,
            current_value: self.current_value,
            ..edited
        })
    }
}
