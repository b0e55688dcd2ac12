//! Pure domain core for the fitness tracker: goal lifecycle and activity
//! aggregation.
//!
//! Everything in this crate is a synchronous, side-effect-free function of
//! its arguments. Records and goal snapshots come in from the store adapter,
//! fresh values go out; no clock reads, no I/O. Dates are plain calendar
//! values (`chrono::NaiveDate`) compared as opaque ordered keys — no
//! timezone arithmetic happens here.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod goal;
pub mod records;
pub mod summary;

pub use goal::{Goal, GoalCategory, GoalDraft, derive_window};
pub use records::{ActivityRecord, WorkoutRecord};
pub use summary::{Period, PeriodSummary, summarize, workout_minutes};

/// Validation failures of the domain core. All of them are local: the caller
/// keeps its original snapshot and surfaces the message; nothing is ever
/// partially applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("target value must be a positive number, got {0}")]
    InvalidTarget(f64),
    #[error("end date {end} precedes start date {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("progress must be a non-negative finite number, got {0}")]
    InvalidProgress(f64),
    #[error("unknown goal category: {0:?}")]
    InvalidCategory(String),
    #[error("unknown goal type: {0:?}")]
    InvalidType(String),
    #[error("unsupported summary period: {0:?}")]
    UnsupportedPeriod(String),
}

/// Inclusive calendar range over which a goal or summary is tracked.
///
/// `end >= start` holds by construction: the only ways to obtain a window
/// are [`derive_window`](crate::goal::derive_window) and
/// [`Period::window_ending`](crate::summary::Period::window_ending).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
