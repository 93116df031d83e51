//! Display strings for challenge countdowns and window spans.

use chrono::Datelike;

use crate::domain::models::challenge::{ChallengeStatusResult, ChallengeWindow, TimeRemaining};

/// Compact remaining time showing the two largest non-zero units, days
/// first: `"9d 4h"`, `"1d 5m"`, `"4h 12m"`, `"12m"`. Under a minute is `"0m"`.
pub fn format_time_remaining(status: &ChallengeStatusResult) -> String {
    format_remaining(&status.time_remaining())
}

pub fn format_remaining(remaining: &TimeRemaining) -> String {
    let units: Vec<String> = [
        (remaining.days, "d"),
        (remaining.hours, "h"),
        (remaining.minutes, "m"),
    ]
    .into_iter()
    .filter(|(value, _)| *value > 0)
    .take(2)
    .map(|(value, unit)| format!("{}{}", value, unit))
    .collect();

    if units.is_empty() {
        "0m".to_string()
    } else {
        units.join(" ")
    }
}

/// Date span of a window, e.g. `"Jan 1 - Feb 15, 2025"`.
///
/// The end month is dropped when it matches the start month
/// (`"Mar 1 - 20, 2025"`) and both years are shown when they differ.
pub fn format_date_range(window: &ChallengeWindow) -> String {
    let start = window.start_date.date();
    let end = window.end_date.date();

    if start.year() != end.year() {
        format!(
            "{}, {} - {}, {}",
            start.format("%b %-d"),
            start.year(),
            end.format("%b %-d"),
            end.year()
        )
    } else if start.month() == end.month() {
        format!("{} - {}, {}", start.format("%b %-d"), end.day(), end.year())
    } else {
        format!("{} - {}, {}", start.format("%b %-d"), end.format("%b %-d"), end.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::challenge::ChallengeThemeDefinition;
    use chrono::NaiveDate;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> ChallengeWindow {
        let theme = ChallengeThemeDefinition {
            month: start.1,
            emoji: "⭐".to_string(),
            title: "Test".to_string(),
            description: String::new(),
        };
        ChallengeWindow {
            year: start.0,
            month: start.1,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            theme,
        }
    }

    fn remaining(days: i64, hours: i64, minutes: i64) -> TimeRemaining {
        TimeRemaining {
            days,
            hours,
            minutes,
            total_milliseconds: ((days * 24 + hours) * 60 + minutes) * 60_000,
        }
    }

    #[test]
    fn test_format_remaining_priority() {
        assert_eq!(format_remaining(&remaining(9, 4, 30)), "9d 4h");
        assert_eq!(format_remaining(&remaining(1, 0, 5)), "1d 5m");
        assert_eq!(format_remaining(&remaining(9, 0, 0)), "9d");
        assert_eq!(format_remaining(&remaining(0, 4, 12)), "4h 12m");
        assert_eq!(format_remaining(&remaining(0, 2, 0)), "2h");
        assert_eq!(format_remaining(&remaining(0, 0, 12)), "12m");
        assert_eq!(format_remaining(&remaining(0, 0, 0)), "0m");
    }

    #[test]
    fn test_format_remaining_skips_zero_units() {
        let remaining = TimeRemaining::from_milliseconds((24 * 60 + 5) * 60_000);
        assert_eq!(format_remaining(&remaining), "1d 5m");
    }

    #[test]
    fn test_format_date_range_across_months() {
        assert_eq!(format_date_range(&window((2025, 1, 1), (2025, 2, 15))), "Jan 1 - Feb 15, 2025");
    }

    #[test]
    fn test_format_date_range_same_month() {
        assert_eq!(format_date_range(&window((2025, 3, 1), (2025, 3, 20))), "Mar 1 - 20, 2025");
    }

    #[test]
    fn test_format_date_range_across_years() {
        assert_eq!(
            format_date_range(&window((2025, 12, 1), (2026, 1, 15))),
            "Dec 1, 2025 - Jan 15, 2026"
        );
    }
}
