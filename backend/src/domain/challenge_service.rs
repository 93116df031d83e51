//! Challenge status resolution.
//!
//! Classifies an instant as inside a challenge window (`active`) or waiting
//! for the next one (`countdown`), with the remaining time and progress the
//! countdown widgets render. Resolution is stateless: every call regenerates
//! windows for the previous, current and next year around `now` and searches
//! them, so the same instant always yields the same result. Where windows
//! overlap, the earliest-starting one that contains the instant is current.

use chrono::{Datelike, Local, NaiveDateTime};
use log::debug;
use shared::ChallengeStatus;
use std::sync::Arc;

use crate::domain::challenge_calendar::ChallengeCalendar;
use crate::domain::commands::challenge::ChallengeStatusQuery;
use crate::domain::models::challenge::{
    ChallengeError, ChallengeStatusResult, ChallengeThemeDefinition, ChallengeWindow, TimeRemaining,
};

/// How many extra years the search may look ahead when the three-year span
/// holds no upcoming window
pub const MAX_HORIZON_EXTENSION_YEARS: i32 = 10;

/// Service that answers "which challenge is running right now?"
#[derive(Debug, Clone)]
pub struct ChallengeService {
    calendar: Arc<ChallengeCalendar>,
}

impl ChallengeService {
    pub fn new(calendar: ChallengeCalendar) -> Self {
        Self {
            calendar: Arc::new(calendar),
        }
    }

    pub fn calendar(&self) -> &ChallengeCalendar {
        &self.calendar
    }

    /// Resolve the challenge status at `now` (local wall-clock time)
    pub fn get_challenge_status(
        &self,
        now: NaiveDateTime,
    ) -> Result<ChallengeStatusResult, ChallengeError> {
        let year = now.year();
        let to_year = year + 1;
        let mut windows = self.calendar.generate_windows(year - 1, to_year);

        // windows are sorted by start, so the first match wins an overlap
        let current = windows.iter().find(|window| window.contains(now)).cloned();

        match current {
            Some(current) => {
                let next = self
                    .find_next_window(&mut windows, to_year, |window| {
                        window.start_date > current.end_date
                    })
                    .ok_or(ChallengeError::NoFutureWindow { after: now })?;

                let remaining = TimeRemaining::from_milliseconds(
                    current.end_date.signed_duration_since(now).num_milliseconds(),
                );
                let progress = progress_percentage(&current, now);
                debug!(
                    "Challenge {}/{} active at {}: {}% complete",
                    current.month, current.year, now, progress
                );

                Ok(ChallengeStatusResult {
                    status: ChallengeStatus::Active,
                    current_challenge: Some(current),
                    next_challenge: next,
                    days_left: remaining.days,
                    hours_left: remaining.hours,
                    minutes_left: remaining.minutes,
                    total_milliseconds_left: remaining.total_milliseconds,
                    progress_percentage: Some(progress),
                })
            }
            None => {
                let next = self
                    .find_next_window(&mut windows, to_year, |window| window.start_date > now)
                    .ok_or(ChallengeError::NoFutureWindow { after: now })?;

                let remaining = TimeRemaining::from_milliseconds(
                    next.start_date.signed_duration_since(now).num_milliseconds(),
                );
                debug!(
                    "No challenge active at {}; next is {}/{}",
                    now, next.month, next.year
                );

                Ok(ChallengeStatusResult {
                    status: ChallengeStatus::Countdown,
                    current_challenge: None,
                    next_challenge: next,
                    days_left: remaining.days,
                    hours_left: remaining.hours,
                    minutes_left: remaining.minutes,
                    total_milliseconds_left: remaining.total_milliseconds,
                    progress_percentage: None,
                })
            }
        }
    }

    /// Resolve the challenge status at the current local time
    pub fn get_current_status(&self) -> Result<ChallengeStatusResult, ChallengeError> {
        self.get_challenge_status(Local::now().naive_local())
    }

    pub fn get_status(
        &self,
        query: ChallengeStatusQuery,
    ) -> Result<ChallengeStatusResult, ChallengeError> {
        match query.at {
            Some(at) => self.get_challenge_status(at),
            None => self.get_current_status(),
        }
    }

    pub fn windows_for_year(&self, year: i32) -> Vec<ChallengeWindow> {
        self.calendar.generate_windows(year, year)
    }

    pub fn themes(&self) -> &[ChallengeThemeDefinition] {
        self.calendar.themes()
    }

    pub fn get_challenge_theme(&self, month: u32) -> Option<&ChallengeThemeDefinition> {
        self.calendar.theme_for_month(month)
    }

    /// First window in start order matching `is_next`, appending later years
    /// to `windows` until one turns up or the extension limit is reached.
    fn find_next_window(
        &self,
        windows: &mut Vec<ChallengeWindow>,
        mut to_year: i32,
        is_next: impl Fn(&ChallengeWindow) -> bool,
    ) -> Option<ChallengeWindow> {
        let limit = to_year.saturating_add(MAX_HORIZON_EXTENSION_YEARS);
        loop {
            if let Some(window) = windows.iter().find(|window| is_next(window)) {
                return Some(window.clone());
            }
            if to_year >= limit {
                return None;
            }
            to_year += 1;
            debug!("Extending challenge horizon to {}", to_year);
            windows.extend(self.calendar.generate_windows(to_year, to_year));
        }
    }
}

impl Default for ChallengeService {
    fn default() -> Self {
        Self::new(ChallengeCalendar::new())
    }
}

/// Elapsed share of `window` at `now`, rounded to the nearest whole percent
fn progress_percentage(window: &ChallengeWindow, now: NaiveDateTime) -> u8 {
    let total = window.duration().num_milliseconds();
    if total <= 0 {
        return 100;
    }
    let elapsed = now.signed_duration_since(window.start_date).num_milliseconds();
    let percentage = (elapsed as f64 * 100.0 / total as f64).round();
    percentage.clamp(0.0, 100.0) as u8
}
