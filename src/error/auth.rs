use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Admin API token is not configured, so mutating endpoints are disabled.
    #[error("Admin API is disabled because no ADMIN_API_TOKEN is configured")]
    AdminApiDisabled,

    /// Request carried no `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bearer token did not match the configured admin token.
    #[error("Invalid bearer token")]
    InvalidToken,

    /// Caller may use admin commands but not change who is an admin.
    #[error("Only server administrators or the bot owner can manage bot admins")]
    CannotManageAdmins,
}

/// Converts authentication errors into HTTP responses.
///
/// - `AdminApiDisabled` / `CannotManageAdmins` → 403 Forbidden
/// - `MissingToken` / `InvalidToken` → 401 Unauthorized
///
/// Client-facing messages stay generic to avoid leaking whether a token is configured
/// beyond what the status code implies.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::AdminApiDisabled => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Admin API is disabled".to_string(),
                }),
            )
                .into_response(),
            Self::CannotManageAdmins => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Forbidden".to_string(),
                }),
            )
                .into_response(),
            Self::MissingToken | Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Unauthorized".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
