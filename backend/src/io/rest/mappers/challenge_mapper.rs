use chrono::NaiveDateTime;
use shared::{
    ChallengeCalendarResponse, ChallengeStatusResponse, ChallengeTheme, ChallengeThemeListResponse,
    ChallengeWindow,
};

use crate::domain::challenge_format::{format_date_range, format_time_remaining};
use crate::domain::models::challenge::{
    ChallengeStatusResult, ChallengeThemeDefinition, ChallengeWindow as DomainChallengeWindow,
};

/// Wire format for local wall-clock instants
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct ChallengeMapper;

impl ChallengeMapper {
    pub fn theme_to_dto(theme: &ChallengeThemeDefinition) -> ChallengeTheme {
        ChallengeTheme {
            month: theme.month,
            emoji: theme.emoji.clone(),
            title: theme.title.clone(),
            description: theme.description.clone(),
        }
    }

    pub fn window_to_dto(window: &DomainChallengeWindow) -> ChallengeWindow {
        ChallengeWindow {
            year: window.year,
            month: window.month,
            start_date: Self::format_instant(window.start_date),
            end_date: Self::format_instant(window.end_date),
            formatted_range: format_date_range(window),
            theme: Self::theme_to_dto(&window.theme),
        }
    }

    pub fn to_status_response(result: &ChallengeStatusResult, computed_at: NaiveDateTime) -> ChallengeStatusResponse {
        ChallengeStatusResponse {
            status: result.status,
            current_challenge: result.current_challenge.as_ref().map(Self::window_to_dto),
            next_challenge: Self::window_to_dto(&result.next_challenge),
            days_left: result.days_left,
            hours_left: result.hours_left,
            minutes_left: result.minutes_left,
            total_milliseconds_left: result.total_milliseconds_left,
            progress_percentage: result.progress_percentage,
            formatted_time_remaining: format_time_remaining(result),
            computed_at: Self::format_instant(computed_at),
        }
    }

    pub fn to_theme_list_response(themes: &[ChallengeThemeDefinition]) -> ChallengeThemeListResponse {
        ChallengeThemeListResponse {
            themes: themes.iter().map(Self::theme_to_dto).collect(),
        }
    }

    pub fn to_calendar_response(year: i32, windows: &[DomainChallengeWindow]) -> ChallengeCalendarResponse {
        ChallengeCalendarResponse {
            year,
            windows: windows.iter().map(Self::window_to_dto).collect(),
        }
    }

    pub fn format_instant(instant: NaiveDateTime) -> String {
        instant.format(DATE_TIME_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChallengeService;
    use chrono::NaiveDate;
    use shared::ChallengeStatus;

    #[test]
    fn test_status_response_includes_formatted_fields() {
        let now = NaiveDate::from_ymd_opt(2025, 2, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = ChallengeService::default().get_challenge_status(now).unwrap();

        let response = ChallengeMapper::to_status_response(&result, now);
        assert_eq!(response.status, ChallengeStatus::Countdown);
        assert_eq!(response.formatted_time_remaining, "9d");
        assert_eq!(response.computed_at, "2025-02-20T00:00:00");
        assert_eq!(response.next_challenge.start_date, "2025-03-01T00:00:00");
        assert_eq!(response.next_challenge.end_date, "2025-04-15T00:00:00");
        assert_eq!(response.next_challenge.formatted_range, "Mar 1 - Apr 15, 2025");
        assert!(response.current_challenge.is_none());
    }
}
