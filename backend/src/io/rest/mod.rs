//! # REST API Interface Layer
//!
//! HTTP endpoints for the learning platform backend. Handlers only translate:
//! they parse input, call a domain service, map the result to a DTO and turn
//! domain errors into status codes with an [`ErrorResponse`] body.

pub mod challenge_apis;
pub mod logging_apis;
pub mod mappers;
pub mod profile_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;

/// JSON error body with the given status code
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}
