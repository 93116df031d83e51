use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{error, info};
use shared::{CreateProfileRequest, ProfileResponse, SwitchRoleRequest};

use super::error_response;
use super::mappers::profile_mapper::ProfileMapper;
use crate::domain::commands::profile::{CreateProfileCommand, SwitchRoleCommand};
use crate::domain::models::profile::ProfileError;
use crate::AppState;

/// Create a router for profile related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/:id", get(get_profile))
        .route("/:id/role", post(switch_role))
}

/// Map a service error onto a status code: validation failures are the
/// caller's fault, unknown profiles are 404, ID exhaustion is a conflict,
/// everything else is ours
fn profile_error_response(e: anyhow::Error) -> Response {
    match e.downcast_ref::<ProfileError>() {
        Some(ProfileError::NotFound(_)) => error_response(StatusCode::NOT_FOUND, e.to_string()),
        Some(ProfileError::AlreadyExists(_)) => error_response(StatusCode::CONFLICT, e.to_string()),
        Some(_) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        None => {
            error!("Profile storage failure: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Profile storage failure")
        }
    }
}

async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles - request: {:?}", request);

    let command = CreateProfileCommand {
        display_name: request.display_name,
        available_roles: request.available_roles.unwrap_or_default(),
    };
    match state.profile_service.create_profile(command).await {
        Ok(result) => {
            let response = ProfileResponse {
                profile: ProfileMapper::to_dto(result.profile),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => profile_error_response(e),
    }
}

async fn get_profile(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/profiles/{}", id);

    match state.profile_service.get_profile(&id).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileMapper::to_dto(profile))).into_response(),
        Err(e) => profile_error_response(e),
    }
}

async fn switch_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SwitchRoleRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles/{}/role - request: {:?}", id, request);

    let command = SwitchRoleCommand {
        profile_id: id,
        role: request.role,
    };
    match state.profile_service.switch_role(command).await {
        Ok(result) => {
            let response = ProfileResponse {
                profile: ProfileMapper::to_dto(result.profile),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => profile_error_response(e),
    }
}
