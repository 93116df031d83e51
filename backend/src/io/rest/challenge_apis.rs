use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Local, NaiveDateTime};
use log::{error, info, warn};
use shared::{ChallengeCalendarRequest, ChallengeStatusRequest};

use super::error_response;
use super::mappers::challenge_mapper::ChallengeMapper;
use crate::domain::commands::challenge::ChallengeStatusQuery;
use crate::AppState;

/// Create a router for challenge related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_challenge_status))
        .route("/themes", get(list_themes))
        .route("/themes/:month", get(get_theme))
        .route("/calendar", get(get_calendar))
}

/// Parse a reference instant: local "YYYY-MM-DDTHH:MM:SS[.fff]" or RFC 3339,
/// the latter converted to local wall-clock time
pub fn parse_reference_instant(value: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|instant| instant.with_timezone(&Local).naive_local())
}

/// Get the active/countdown status, optionally at a given instant
async fn get_challenge_status(
    State(state): State<AppState>,
    Query(request): Query<ChallengeStatusRequest>,
) -> impl IntoResponse {
    info!("GET /api/challenges/status - query: {:?}", request);

    let at = match request.at.as_deref() {
        Some(raw) => match parse_reference_instant(raw) {
            Some(at) => at,
            None => {
                warn!("Rejected challenge status query with invalid instant: {}", raw);
                return error_response(StatusCode::BAD_REQUEST, format!("Invalid instant: {}", raw));
            }
        },
        None => Local::now().naive_local(),
    };

    let query = ChallengeStatusQuery { at: Some(at) };
    match state.challenge_service.get_status(query) {
        Ok(result) => {
            let response = ChallengeMapper::to_status_response(&result, at);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to resolve challenge status at {}: {}", at, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// List every configured challenge theme
async fn list_themes(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/challenges/themes");

    let response = ChallengeMapper::to_theme_list_response(state.challenge_service.themes());
    (StatusCode::OK, Json(response)).into_response()
}

/// Get the theme for one start month
async fn get_theme(State(state): State<AppState>, Path(month): Path<u32>) -> impl IntoResponse {
    info!("GET /api/challenges/themes/{}", month);

    match state.challenge_service.get_challenge_theme(month) {
        Some(theme) => (StatusCode::OK, Json(ChallengeMapper::theme_to_dto(theme))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No challenge starts in month {}", month),
        ),
    }
}

/// Get all challenge windows of a year
async fn get_calendar(
    State(state): State<AppState>,
    Query(request): Query<ChallengeCalendarRequest>,
) -> impl IntoResponse {
    info!("GET /api/challenges/calendar - query: {:?}", request);

    let windows = state.challenge_service.windows_for_year(request.year);
    if windows.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Year {} is out of range", request.year),
        );
    }
    let response = ChallengeMapper::to_calendar_response(request.year, &windows);
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use crate::test_utils::TestEnvironment;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use shared::{
        ChallengeCalendarResponse, ChallengeStatus, ChallengeStatusResponse, ChallengeTheme,
        ChallengeThemeListResponse, ErrorResponse,
    };
    use tower::ServiceExt;

    async fn get(uri: &str) -> Result<(StatusCode, Vec<u8>), Box<dyn std::error::Error>> {
        let env = TestEnvironment::new()?;
        let app = create_router(env.app_state.clone());
        let response = app
            .oneshot(Request::builder().uri(uri).method(Method::GET).body(Body::empty())?)
            .await?;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, body.to_vec()))
    }

    #[test]
    fn test_parse_reference_instant() {
        let naive = parse_reference_instant("2025-01-23T12:00:00").unwrap();
        assert_eq!(naive.to_string(), "2025-01-23 12:00:00");
        assert!(parse_reference_instant("2025-01-23T12:00:00.500").is_some());
        assert!(parse_reference_instant("2025-01-23T12:00:00Z").is_some());
        assert!(parse_reference_instant("next tuesday").is_none());
    }

    #[tokio::test]
    async fn test_get_status_at_instant() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/api/challenges/status?at=2025-01-23T12:00:00").await?;
        assert_eq!(status, StatusCode::OK);

        let response: ChallengeStatusResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.status, ChallengeStatus::Active);
        assert_eq!(response.progress_percentage, Some(50));
        assert_eq!(response.current_challenge.unwrap().formatted_range, "Jan 1 - Feb 15, 2025");
        assert_eq!(response.next_challenge.month, 3);
        assert_eq!(response.formatted_time_remaining, "22d 12h");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_status_now() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/api/challenges/status").await?;
        assert_eq!(status, StatusCode::OK);
        let response: ChallengeStatusResponse = serde_json::from_slice(&body)?;
        assert!(response.total_milliseconds_left > 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_status_invalid_instant() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/api/challenges/status?at=yesterday").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let response: ErrorResponse = serde_json::from_slice(&body)?;
        assert!(response.error.contains("yesterday"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_themes() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/api/challenges/themes").await?;
        assert_eq!(status, StatusCode::OK);
        let response: ChallengeThemeListResponse = serde_json::from_slice(&body)?;
        let months: Vec<u32> = response.themes.iter().map(|t| t.month).collect();
        assert_eq!(months, vec![1, 3, 4, 5, 7, 9, 11]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_theme() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/api/challenges/themes/11").await?;
        assert_eq!(status, StatusCode::OK);
        let theme: ChallengeTheme = serde_json::from_slice(&body)?;
        assert_eq!(theme.title, "Year-End Mastery");

        let (status, _) = get("/api/challenges/themes/2").await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_calendar() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/api/challenges/calendar?year=2026").await?;
        assert_eq!(status, StatusCode::OK);
        let response: ChallengeCalendarResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.year, 2026);
        assert_eq!(response.windows.len(), 7);
        assert_eq!(response.windows[6].formatted_range, "Nov 1 - Dec 16, 2026");
        Ok(())
    }
}
