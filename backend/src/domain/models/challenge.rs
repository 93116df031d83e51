//! Domain models for seasonal challenge windows.
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::ChallengeStatus;

/// Theme metadata for the challenge that opens on the first day of `month`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeThemeDefinition {
    pub month: u32,
    pub emoji: String,
    pub title: String,
    pub description: String,
}

/// A concrete challenge window. `start_date` is inclusive, `end_date` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeWindow {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub theme: ChallengeThemeDefinition,
}

impl ChallengeWindow {
    /// Half-open containment: `start_date <= now < end_date`
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start_date <= now && now < self.end_date
    }

    pub fn duration(&self) -> Duration {
        self.end_date.signed_duration_since(self.start_date)
    }
}

/// Remaining time broken down for countdown display.
///
/// Every unit is truncated, never rounded: 59 seconds left shows as 0 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub total_milliseconds: i64,
}

impl TimeRemaining {
    pub fn from_milliseconds(total_milliseconds: i64) -> Self {
        let total_minutes = total_milliseconds / 60_000;
        let total_hours = total_minutes / 60;
        Self {
            days: total_hours / 24,
            hours: total_hours % 24,
            minutes: total_minutes % 60,
            total_milliseconds,
        }
    }
}

/// Outcome of resolving the challenge status for one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeStatusResult {
    pub status: ChallengeStatus,
    pub current_challenge: Option<ChallengeWindow>,
    pub next_challenge: ChallengeWindow,
    pub days_left: i64,
    pub hours_left: i64,
    pub minutes_left: i64,
    pub total_milliseconds_left: i64,
    pub progress_percentage: Option<u8>,
}

impl ChallengeStatusResult {
    pub fn time_remaining(&self) -> TimeRemaining {
        TimeRemaining {
            days: self.days_left,
            hours: self.hours_left,
            minutes: self.minutes_left,
            total_milliseconds: self.total_milliseconds_left,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ChallengeStatus::Active
    }
}

/// Two configured windows whose nominal spans collide within a year
/// (or across the December to January wrap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOverlap {
    pub year: i32,
    pub month: u32,
    pub next_year: i32,
    pub next_month: u32,
    /// Whole days the nominal window runs past the next start
    pub overlap_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    #[error("Invalid challenge month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Challenge month {0} is configured more than once")]
    DuplicateMonth(u32),
    #[error("Challenge calendar has no themes configured")]
    EmptyCalendar,
    #[error("Challenge duration must be at least one day, got {0}")]
    InvalidDuration(i64),
    #[error("No future challenge window configured after {after}")]
    NoFutureWindow { after: NaiveDateTime },
}
