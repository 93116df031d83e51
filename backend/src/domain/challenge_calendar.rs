//! Seasonal challenge calendar.
//!
//! Holds the annual table of themed challenges and turns it into concrete
//! windows for a range of years. Each challenge opens at local midnight on the
//! first day of its month and runs for a fixed number of days, crossing month
//! and year boundaries freely.
//!
//! Windows always keep their full length. A table whose starts are closer
//! together than that produces overlapping windows (the default table does
//! for March and April); [`ChallengeCalendar::nominal_overlaps`] reports them.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::collections::BTreeSet;

use crate::domain::models::challenge::{
    ChallengeError, ChallengeThemeDefinition, ChallengeWindow, WindowOverlap,
};

/// Length of every challenge window, in days
pub const CHALLENGE_DURATION_DAYS: i64 = 45;

/// Months a challenge starts in, always on day 1
pub const CHALLENGE_START_MONTHS: [u32; 7] = [1, 3, 4, 5, 7, 9, 11];

const DEFAULT_THEMES: [(u32, &str, &str, &str); 7] = [
    (
        1,
        "🎯",
        "New Year Kickstart",
        "Set your learning goals for the year and build a daily study habit.",
    ),
    (
        3,
        "🌱",
        "Spring Growth",
        "Pick one new skill and practice it a little every day.",
    ),
    (
        4,
        "📚",
        "Deep Dive",
        "Finish a full course from the first lesson to the last.",
    ),
    (
        5,
        "🤝",
        "Community Builder",
        "Share your progress and give feedback to fellow learners.",
    ),
    (
        7,
        "☀️",
        "Summer Sprint",
        "Complete as many lessons as you can before the summer break.",
    ),
    (
        9,
        "🍂",
        "Back to Basics",
        "Revisit the fundamentals and close the gaps in your knowledge.",
    ),
    (
        11,
        "🏁",
        "Year-End Mastery",
        "Wrap up the year with a capstone project and a coaching review.",
    ),
];

/// The built-in theme table, ordered by month
pub fn default_themes() -> Vec<ChallengeThemeDefinition> {
    DEFAULT_THEMES
        .iter()
        .map(|(month, emoji, title, description)| ChallengeThemeDefinition {
            month: *month,
            emoji: emoji.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Look up the built-in theme for a start month
pub fn get_challenge_theme(month: u32) -> Option<ChallengeThemeDefinition> {
    default_themes().into_iter().find(|theme| theme.month == month)
}

/// Local midnight on the first day of `month` in `year`, if representable
pub fn window_start(year: i32, month: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

/// Validated, immutable table of challenge themes plus the window length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeCalendar {
    /// Sorted ascending by month, one entry per month
    themes: Vec<ChallengeThemeDefinition>,
    duration_days: i64,
}

impl ChallengeCalendar {
    /// The built-in calendar: seven 45-day challenges
    pub fn new() -> Self {
        Self {
            themes: default_themes(),
            duration_days: CHALLENGE_DURATION_DAYS,
        }
    }

    /// Build a calendar from configured themes
    pub fn from_definitions(
        mut themes: Vec<ChallengeThemeDefinition>,
        duration_days: i64,
    ) -> Result<Self, ChallengeError> {
        if themes.is_empty() {
            return Err(ChallengeError::EmptyCalendar);
        }
        if duration_days < 1 {
            return Err(ChallengeError::InvalidDuration(duration_days));
        }

        let mut seen = BTreeSet::new();
        for theme in &themes {
            if !(1..=12).contains(&theme.month) {
                return Err(ChallengeError::InvalidMonth(theme.month));
            }
            if !seen.insert(theme.month) {
                return Err(ChallengeError::DuplicateMonth(theme.month));
            }
        }

        themes.sort_by_key(|theme| theme.month);
        Ok(Self {
            themes,
            duration_days,
        })
    }

    pub fn themes(&self) -> &[ChallengeThemeDefinition] {
        &self.themes
    }

    pub fn duration_days(&self) -> i64 {
        self.duration_days
    }

    pub fn theme_for_month(&self, month: u32) -> Option<&ChallengeThemeDefinition> {
        self.themes.iter().find(|theme| theme.month == month)
    }

    /// Every window for every configured month in `[from_year, to_year]`,
    /// sorted ascending by start. An inverted range yields nothing.
    pub fn generate_windows(&self, from_year: i32, to_year: i32) -> Vec<ChallengeWindow> {
        let mut windows = Vec::new();
        if from_year > to_year {
            return windows;
        }

        let length = Duration::days(self.duration_days);
        for year in from_year..=to_year {
            for theme in &self.themes {
                let Some(start_date) = window_start(year, theme.month) else {
                    warn!("Skipping unrepresentable challenge window {}/{}", theme.month, year);
                    continue;
                };
                let Some(end_date) = start_date.checked_add_signed(length) else {
                    warn!("Skipping challenge window {}/{} with unrepresentable end", theme.month, year);
                    continue;
                };

                windows.push(ChallengeWindow {
                    year,
                    month: theme.month,
                    start_date,
                    end_date,
                    theme: theme.clone(),
                });
            }
        }

        windows.sort_by_key(|window| window.start_date);
        debug!(
            "Generated {} challenge windows for {}..={}",
            windows.len(),
            from_year,
            to_year
        );
        windows
    }

    /// Pairs of consecutive challenges in `year` whose window runs past the
    /// next start, including the last challenge of the year against the
    /// first of the following year. Empty when no two windows overlap.
    pub fn nominal_overlaps(&self, year: i32) -> Vec<WindowOverlap> {
        let length = Duration::days(self.duration_days);
        let mut overlaps = Vec::new();

        for (index, theme) in self.themes.iter().enumerate() {
            let (next_year, next_month) = match self.themes.get(index + 1) {
                Some(next) => (year, next.month),
                None => (year + 1, self.themes[0].month),
            };
            let (Some(start), Some(next_start)) =
                (window_start(year, theme.month), window_start(next_year, next_month))
            else {
                continue;
            };
            let Some(end) = start.checked_add_signed(length) else {
                continue;
            };

            if end > next_start {
                overlaps.push(WindowOverlap {
                    year,
                    month: theme.month,
                    next_year,
                    next_month,
                    overlap_days: end.signed_duration_since(next_start).num_days(),
                });
            }
        }

        overlaps
    }
}

impl Default for ChallengeCalendar {
    fn default() -> Self {
        Self::new()
    }
}
