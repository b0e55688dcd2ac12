//! Input records as the external store delivers them.
//!
//! Field renames follow the backend wire format (`activityDate`,
//! `distance`, `workoutDate`, ...); the Rust names follow the domain
//! vocabulary. Records are read-only inputs to the aggregator and the goal
//! engine — the core never mutates or persists them.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One day of logged ambient activity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(rename = "activityDate")]
    pub date: NaiveDate,
    pub steps: u32,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub calories_burned: u32,
}

/// A single logged workout session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    #[serde(rename = "workoutDate")]
    pub date: NaiveDate,
    /// Free-text label ("Running", "Yoga", ...); the core does not interpret it.
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(rename = "calories")]
    pub calories_burned: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
