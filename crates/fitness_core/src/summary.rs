//! Activity aggregation: reduce raw records into a periodic summary.
//!
//! `summarize` is deterministic for a given record set and reference date;
//! the caller injects the reference date, so nothing here ever reads a
//! clock.

use chrono::{Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ActivityRecord, DateWindow, TrackerError, WorkoutRecord};

/// Tracking cadence, shared by goals and summaries: a day or a 7-day window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    Daily,
    Weekly,
}

impl Period {
    /// Parse a summary period as the presentation layer sends it.
    /// Case-insensitive, mirroring the backend's period comparison.
    pub fn parse_period(s: &str) -> Result<Self, TrackerError> {
        if s.eq_ignore_ascii_case("daily") {
            Ok(Self::Daily)
        } else if s.eq_ignore_ascii_case("weekly") {
            Ok(Self::Weekly)
        } else {
            Err(TrackerError::UnsupportedPeriod(s.to_string()))
        }
    }

    /// Parse a goal type wire token (`DAILY` / `WEEKLY`).
    pub fn parse_goal_type(s: &str) -> Result<Self, TrackerError> {
        match s {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            _ => Err(TrackerError::InvalidType(s.to_string())),
        }
    }

    /// The wire token, inverse of [`parse_goal_type`](Self::parse_goal_type).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
        }
    }

    /// Number of days in the period, counting both endpoints.
    pub fn span_days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
        }
    }

    /// The inclusive window that ends on `reference`: the reference day
    /// itself for `Daily`, the trailing 7 days for `Weekly`.
    pub fn window_ending(self, reference: NaiveDate) -> DateWindow {
        DateWindow {
            start: reference - Duration::days(self.span_days() - 1),
            end: reference,
        }
    }
}

/// Aggregated totals plus the per-day breakdown for one period.
///
/// Derived on demand, never persisted. `daily_series` holds the included
/// records in ascending date order; records sharing a date keep their input
/// order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: Period,
    pub window: DateWindow,
    pub total_steps: u64,
    pub total_distance_km: f64,
    pub total_calories: u64,
    pub daily_series: Vec<ActivityRecord>,
}

impl PeriodSummary {
    /// Distance total for presentation, rounded to 2 decimal places.
    /// Internal summation is never rounded; only this accessor is.
    pub fn total_distance_km_rounded(&self) -> f64 {
        (self.total_distance_km * 100.0).round() / 100.0
    }
}

/// Reduce `records` into the summary for the period ending on
/// `reference_date`.
///
/// Records outside the window are ignored; an empty filtered set yields
/// zero totals and an empty series, which is a valid summary rather than an
/// error.
pub fn summarize(records: &[ActivityRecord], period: Period, reference_date: NaiveDate) -> PeriodSummary {
    let window = period.window_ending(reference_date);

    let mut daily_series: Vec<ActivityRecord> = records
        .iter()
        .filter(|r| window.contains(r.date))
        .cloned()
        .collect();
    // stable sort: equal dates keep insertion order
    daily_series.sort_by_key(|r| r.date);

    let total_steps = daily_series.iter().map(|r| u64::from(r.steps)).sum();
    let total_distance_km = daily_series.iter().map(|r| r.distance_km).sum();
    let total_calories = daily_series
        .iter()
        .map(|r| u64::from(r.calories_burned))
        .sum();

    PeriodSummary {
        period,
        window,
        total_steps,
        total_distance_km,
        total_calories,
        daily_series,
    }
}

/// Sum of workout durations (minutes) falling inside `window`. Backs the
/// workout-time goal metric.
pub fn workout_minutes(workouts: &[WorkoutRecord], window: DateWindow) -> u64 {
    workouts
        .iter()
        .filter(|w| window.contains(w.date))
        .map(|w| u64::from(w.duration_minutes))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("date literal")
    }

    fn activity(date: &str, steps: u32, distance_km: f64, calories: u32) -> ActivityRecord {
        ActivityRecord {
            date: d(date),
            steps,
            distance_km,
            calories_burned: calories,
        }
    }

    #[test]
    fn parse_period_is_case_insensitive() {
        assert_eq!(Period::parse_period("Weekly").unwrap(), Period::Weekly);
        assert_eq!(Period::parse_period("DAILY").unwrap(), Period::Daily);
        assert_eq!(
            Period::parse_period("monthly"),
            Err(TrackerError::UnsupportedPeriod("monthly".into()))
        );
    }

    #[test]
    fn parse_goal_type_takes_wire_tokens_only() {
        assert_eq!(Period::parse_goal_type("WEEKLY").unwrap(), Period::Weekly);
        assert_eq!(
            Period::parse_goal_type("weekly"),
            Err(TrackerError::InvalidType("weekly".into()))
        );
    }

    #[test]
    fn weekly_window_is_seven_days_inclusive() {
        let w = Period::Weekly.window_ending(d("2024-01-07"));
        assert_eq!(w.start, d("2024-01-01"));
        assert_eq!(w.end, d("2024-01-07"));
    }

    #[test]
    fn daily_window_is_the_reference_day() {
        let w = Period::Daily.window_ending(d("2024-01-07"));
        assert_eq!(w.start, d("2024-01-07"));
        assert_eq!(w.end, d("2024-01-07"));
    }

    #[test]
    fn summarize_weekly_filters_and_totals() {
        let records = vec![
            activity("2024-01-01", 1000, 0.8, 40),
            activity("2024-01-03", 2000, 1.6, 80),
            activity("2023-12-30", 9999, 9.9, 999), // outside the window
        ];
        let s = summarize(&records, Period::Weekly, d("2024-01-07"));
        assert_eq!(s.total_steps, 3000);
        assert_eq!(s.total_calories, 120);
        assert!((s.total_distance_km - 2.4).abs() < 1e-9);
        assert_eq!(s.daily_series.len(), 2);
        assert_eq!(s.daily_series[0].date, d("2024-01-01"));
        assert_eq!(s.daily_series[1].date, d("2024-01-03"));
    }

    #[test]
    fn summarize_empty_set_is_all_zero_not_an_error() {
        for period in [Period::Daily, Period::Weekly] {
            let s = summarize(&[], period, d("2024-01-07"));
            assert_eq!(s.total_steps, 0);
            assert_eq!(s.total_distance_km, 0.0);
            assert_eq!(s.total_calories, 0);
            assert!(s.daily_series.is_empty());
        }
    }

    #[test]
    fn summarize_totals_are_order_independent_and_series_is_sorted() {
        let mut records = vec![
            activity("2024-01-05", 500, 0.4, 20),
            activity("2024-01-02", 700, 0.5, 30),
            activity("2024-01-04", 300, 0.2, 10),
        ];
        let forward = summarize(&records, Period::Weekly, d("2024-01-07"));
        records.reverse();
        let backward = summarize(&records, Period::Weekly, d("2024-01-07"));
        assert_eq!(forward.total_steps, backward.total_steps);
        assert_eq!(forward.total_calories, backward.total_calories);
        let dates: Vec<_> = forward.daily_series.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2024-01-02"), d("2024-01-04"), d("2024-01-05")]);
        let dates: Vec<_> = backward.daily_series.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2024-01-02"), d("2024-01-04"), d("2024-01-05")]);
    }

    #[test]
    fn summarize_keeps_insertion_order_for_equal_dates() {
        let records = vec![
            activity("2024-01-03", 100, 0.1, 5),
            activity("2024-01-03", 200, 0.2, 10),
        ];
        let s = summarize(&records, Period::Daily, d("2024-01-03"));
        assert_eq!(s.daily_series[0].steps, 100);
        assert_eq!(s.daily_series[1].steps, 200);
    }

    #[test]
    fn daily_summary_ignores_the_rest_of_the_week() {
        let records = vec![
            activity("2024-01-06", 4000, 3.0, 150),
            activity("2024-01-07", 6000, 4.5, 220),
        ];
        let s = summarize(&records, Period::Daily, d("2024-01-07"));
        assert_eq!(s.total_steps, 6000);
        assert_eq!(s.daily_series.len(), 1);
    }

    #[test]
    fn distance_rounding_is_presentation_only() {
        let records = vec![
            activity("2024-01-01", 0, 1.005, 0),
            activity("2024-01-02", 0, 2.001, 0),
        ];
        let s = summarize(&records, Period::Weekly, d("2024-01-07"));
        assert!((s.total_distance_km - 3.006).abs() < 1e-9);
        assert_eq!(s.total_distance_km_rounded(), 3.01);
    }

    #[test]
    fn workout_minutes_filters_by_window() {
        let workouts = vec![
            WorkoutRecord {
                date: d("2024-01-02"),
                workout_type: "Running".into(),
                duration_minutes: 45,
                calories_burned: 400,
                notes: None,
            },
            WorkoutRecord {
                date: d("2023-12-25"),
                workout_type: "Cycling".into(),
                duration_minutes: 90,
                calories_burned: 700,
                notes: Some("outside window".into()),
            },
        ];
        let window = Period::Weekly.window_ending(d("2024-01-07"));
        assert_eq!(workout_minutes(&workouts, window), 45);
    }
}
