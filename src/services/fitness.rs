// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly fitness totals and goal progress.

use crate::services::strava::StravaActivitySummary;
use chrono::NaiveDateTime;

/// Strava activity types counted towards the running (Agility) goal.
const RUNNING_TYPES: &[&str] = &["Run", "TrailRun", "VirtualRun"];

/// Strava activity types counted towards the strength goal.
const STRENGTH_TYPES: &[&str] = &["WeightTraining", "Workout"];

/// Format of `start_date_local` (local wall-clock time despite the `Z`).
const START_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Totals for the current week.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeeklyTotals {
    pub running_km: f64,
    pub strength_hours: f64,
}

impl WeeklyTotals {
    /// Sum running distance and strength duration for activities starting on
    /// or after `week_start`.
    ///
    /// Activities with an unparseable start date are skipped.
    pub fn from_activities(activities: &[StravaActivitySummary], week_start: NaiveDateTime) -> Self {
        let mut totals = Self::default();

        for activity in activities {
            let started = match NaiveDateTime::parse_from_str(
                &activity.start_date_local,
                START_DATE_FORMAT,
            ) {
                Ok(started) => started,
                Err(e) => {
                    tracing::debug!(
                        start_date_local = %activity.start_date_local,
                        error = %e,
                        "Skipping activity with unparseable start date"
                    );
                    continue;
                }
            };

            if started < week_start {
                continue;
            }

            let kind = activity.activity_type.as_str();
            if RUNNING_TYPES.contains(&kind) {
                totals.running_km += activity.distance / 1000.0;
            } else if STRENGTH_TYPES.contains(&kind) {
                totals.strength_hours += activity.moving_time as f64 / 3600.0;
            }
        }

        totals
    }

    /// Running distance for display, e.g. "12.4 km".
    pub fn running_display(&self) -> String {
        format!("{:.1} km", self.running_km)
    }

    /// Strength duration for display, e.g. "1.5 hours".
    pub fn strength_display(&self) -> String {
        format!("{:.1} hours", self.strength_hours)
    }

    /// Running progress, measured from the displayed (one decimal) distance.
    pub fn running_progress(&self, target_km: f64) -> f64 {
        progress_percentage(displayed(self.running_km), target_km)
    }

    /// Strength progress, measured from the displayed (one decimal) duration.
    pub fn strength_progress(&self, target_hours: f64) -> f64 {
        progress_percentage(displayed(self.strength_hours), target_hours)
    }
}

/// The value as it reads on the dashboard after `{:.1}` formatting.
fn displayed(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Progress towards a target in percent, rounded to one decimal and clamped
/// to `0.0..=100.0`. A non-positive target yields 0.
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    let percentage = ((current / target) * 100.0 * 10.0).round() / 10.0;
    percentage.clamp(0.0, 100.0)
}
