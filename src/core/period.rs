//! Report period metadata - date, time, week, month and year labels
//!
//! The week number is NOT an ISO-8601 week. It is
//! `ceil((days since Jan 1 00:00 local + weekday + 1) / 7)` with fractional
//! days and Sunday = 0. Existing reports depend on this exact arithmetic,
//! including its jumps around weekends and year boundaries.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Time labels attached to a report summary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMetadata {
    /// UTC calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Local time of day, `HH:MM:SS`
    pub time: String,

    /// Week number (see module docs)
    pub week: u32,

    /// Full month name, e.g. `October`
    pub month: String,

    pub year: i32,
}

impl TimeMetadata {
    /// Metadata for a given moment in any time zone
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let local = now.naive_local();
        Self {
            date: now.naive_utc().format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M:%S").to_string(),
            week: week_number(now),
            month: local.format("%B").to_string(),
            year: local.year(),
        }
    }

    /// Week label as written to reports, e.g. `W42`
    pub fn week_label(&self) -> String {
        format!("W{}", self.week)
    }
}

/// Report week number for a moment
pub fn week_number<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    let day_of_week = now.weekday().num_days_from_sunday() as f64;
    ((days_since_new_year(now) + day_of_week + 1.0) / 7.0).ceil() as u32
}

/// Fractional days elapsed since local midnight on January 1st
fn days_since_new_year<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    let local = now.naive_local();
    let new_year = local
        .date()
        .with_ordinal(1)
        .unwrap_or(local.date())
        .and_time(NaiveTime::default());

    let elapsed = match now.timezone().from_local_datetime(&new_year).earliest() {
        Some(start) => now.clone().signed_duration_since(start),
        None => local - new_year,
    };

    elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY
}
