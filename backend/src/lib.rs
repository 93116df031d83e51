//! # Learning Platform Backend
//!
//! Server-side logic for the learning platform that is not plain data access:
//! the seasonal challenge scheduler and profile role management.
//!
//! ## Architecture
//!
//! ```text
//! Clients (web frontend, mobile)
//!     ↓
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (challenge calendar, status resolver, profile rules)
//!     ↓
//! Storage Layer (profile documents)
//! ```
//!
//! Services receive their dependencies when the backend is initialized;
//! nothing reaches for a global client.

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use chrono::{Datelike, Local};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::domain::{ChallengeService, ProfileService};
use crate::storage::{ProfileStorage, YamlConnection, YamlProfileRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub challenge_service: ChallengeService,
    pub profile_service: ProfileService,
    pub config: Arc<AppConfig>,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up challenge calendar");
    let calendar = config
        .challenge_calendar()
        .context("Failed to build challenge calendar")?;
    let current_year = Local::now().year();
    for overlap in calendar.nominal_overlaps(current_year) {
        warn!(
            "Challenge {}/{} overlaps {}/{} by {} days; the earlier challenge stays current until it ends",
            overlap.month, overlap.year, overlap.next_month, overlap.next_year, overlap.overlap_days
        );
    }
    let challenge_service = ChallengeService::new(calendar);

    info!("Setting up profile storage in {}", config.data_directory.display());
    let connection = YamlConnection::new(&config.data_directory)?;
    let profile_storage: Arc<dyn ProfileStorage> = Arc::new(YamlProfileRepository::new(connection));
    let profile_service = ProfileService::new(profile_storage);

    Ok(AppState {
        challenge_service,
        profile_service,
        config: Arc::new(config.clone()),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    let cors = match app_state.config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!(
                "Invalid CORS origin '{}', allowing any origin",
                app_state.config.cors_origin
            );
            cors.allow_origin(Any)
        }
    };

    let api_routes = Router::new()
        .nest("/challenges", io::challenge_apis::router())
        .nest("/profiles", io::profile_apis::router())
        .nest("/logs", io::logging_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
