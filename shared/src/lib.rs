use serde::{Deserialize, Serialize};
use std::fmt;

/// Display metadata for a seasonal challenge, keyed by the month it starts in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeTheme {
    /// Calendar month the challenge window opens on (1-12, always on day 1)
    pub month: u32,
    pub emoji: String,
    pub title: String,
    pub description: String,
}

/// A concrete challenge window for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeWindow {
    pub year: i32,
    pub month: u32,
    /// Local wall-clock start, inclusive (ISO 8601, e.g. "2025-01-01T00:00:00")
    pub start_date: String,
    /// Local wall-clock end, exclusive (ISO 8601)
    pub end_date: String,
    /// Human-readable span, e.g. "Jan 1 - Feb 15, 2025"
    pub formatted_range: String,
    pub theme: ChallengeTheme,
}

/// Whether "now" is inside a challenge window or waiting for the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Countdown,
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeStatus::Active => write!(f, "active"),
            ChallengeStatus::Countdown => write!(f, "countdown"),
        }
    }
}

/// Query parameters for the challenge status endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeStatusRequest {
    /// Reference instant (RFC 3339 or local "YYYY-MM-DDTHH:MM:SS"); defaults to now
    pub at: Option<String>,
}

/// Challenge status as rendered by the countdown and progress widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeStatusResponse {
    pub status: ChallengeStatus,
    /// Present only while a challenge is active
    pub current_challenge: Option<ChallengeWindow>,
    pub next_challenge: ChallengeWindow,
    pub days_left: i64,
    pub hours_left: i64,
    pub minutes_left: i64,
    pub total_milliseconds_left: i64,
    /// 0-100, present only while a challenge is active
    pub progress_percentage: Option<u8>,
    /// Compact remaining time, e.g. "9d 4h"
    pub formatted_time_remaining: String,
    /// The instant the status was computed for (ISO 8601)
    pub computed_at: String,
}

/// Response containing every configured challenge theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeThemeListResponse {
    pub themes: Vec<ChallengeTheme>,
}

/// Request for the windows of a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeCalendarRequest {
    pub year: i32,
}

/// All challenge windows for a year, in start order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeCalendarResponse {
    pub year: i32,
    pub windows: Vec<ChallengeWindow>,
}

/// Role a profile is currently acting as
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Coach,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Coach => write!(f, "coach"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Platform member profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub available_roles: Vec<Role>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProfileRequest {
    pub display_name: String,
    /// Roles the profile may switch between; defaults to just `student`
    pub available_roles: Option<Vec<Role>>,
}

/// Request for switching the active role of a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwitchRoleRequest {
    pub role: Role,
}

/// Response after creating a profile or switching its role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub success_message: String,
}

/// Error body returned by the REST API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl Profile {
    /// Generate a profile ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("profile::{}", epoch_millis)
    }

    /// Parse a profile ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, ProfileIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "profile" {
            return Err(ProfileIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| ProfileIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ProfileIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileIdError::InvalidFormat => write!(f, "Invalid profile ID format"),
            ProfileIdError::InvalidTimestamp => write!(f, "Invalid timestamp in profile ID"),
        }
    }
}

impl std::error::Error for ProfileIdError {}
