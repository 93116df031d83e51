use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use log::{log, Level};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Component name used when a client does not say where a line came from
pub const DEFAULT_CLIENT_COMPONENT: &str = "learning-platform-web";

/// A log line forwarded by a platform client
#[derive(Debug, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
    /// Profile the client was acting as, if any
    #[serde(default)]
    pub profile_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
    /// Level the line was recorded at after parsing
    pub level: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Client levels are matched case-insensitively; anything unknown is info
fn client_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::Info)
}

/// Re-emit a client log line through the server's logger
pub async fn log_message(
    State(_app_state): State<AppState>,
    Json(request): Json<LogRequest>,
) -> Result<Json<LogResponse>, StatusCode> {
    let level = client_level(&request.level);
    let component = request
        .component
        .as_deref()
        .filter(|component| !component.trim().is_empty())
        .unwrap_or(DEFAULT_CLIENT_COMPONENT);

    match request.profile_id.as_deref() {
        Some(profile_id) => log!(level, "[{}] ({}) {}", component, profile_id, request.message),
        None => log!(level, "[{}] {}", component, request.message),
    }

    Ok(Json(LogResponse {
        success: true,
        level: level.to_string().to_lowercase(),
    }))
}
