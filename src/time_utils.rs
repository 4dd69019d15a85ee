// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for local date/time arithmetic and formatting.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Monday 00:00 of the week containing `now` (local wall-clock time).
pub fn week_start(now: NaiveDateTime) -> NaiveDateTime {
    let days_from_monday = now.weekday().num_days_from_monday() as i64;
    (now.date() - Duration::days(days_from_monday))
        .and_hms_opt(0, 0, 0)
        .unwrap_or(now)
}

/// Days of activity history needed to cover the current week (inclusive).
pub fn days_since_week_start(now: NaiveDateTime) -> i64 {
    (now - week_start(now)).num_days() + 1
}

/// Local midnight for a calendar date; `None` if midnight does not exist there.
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
}

/// Convert a Unix timestamp to local time.
pub fn local_from_unix(secs: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.with_timezone(&Local))
}

/// Format a Unix timestamp as a local `HH:MM` clock time.
pub fn format_clock(secs: i64) -> Option<String> {
    local_from_unix(secs).map(|dt| dt.format("%H:%M").to_string())
}

/// Day of month with its English ordinal suffix ("1st", "12th", "23rd").
pub fn ordinal(day: u32) -> String {
    let suffix = if (10..=20).contains(&(day % 100)) {
        "th"
    } else {
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", day, suffix)
}

/// Dashboard date line, e.g. "Sunday 18th October".
pub fn format_long_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} {} {}",
        now.format("%A"),
        ordinal(now.day()),
        now.format("%B")
    )
}
