//! Central error-to-response mapping. Handlers convert domain failures into
//! `ApiError` (mostly via `From` + `?`) and never build ad hoc error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::auth::errors::AuthError;
use service::probe::ProbeError;
use service::tracker::TrackerError;
use thiserror::Error;
use tracing::error;

/// One itemized validation violation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    // Stays at 400; a conflict-specific status would be a wire-visible
    // change for existing clients.
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token provided")]
    Unauthenticated,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("probe timed out")]
    ProbeTimeout,
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": violations })),
            )
                .into_response(),
            ApiError::DuplicateEmail => json_error(StatusCode::BAD_REQUEST, &self.to_string()),
            ApiError::InvalidCredentials => json_error(StatusCode::UNAUTHORIZED, &self.to_string()),
            ApiError::Unauthenticated => json_error(StatusCode::UNAUTHORIZED, &self.to_string()),
            ApiError::InvalidToken => json_error(StatusCode::FORBIDDEN, &self.to_string()),
            ApiError::NotFound(_) => json_error(StatusCode::NOT_FOUND, &self.to_string()),
            ApiError::Navigation(_) => json_error(StatusCode::BAD_GATEWAY, &self.to_string()),
            ApiError::SelectorNotFound(_) => {
                json_error(StatusCode::UNPROCESSABLE_ENTITY, &self.to_string())
            }
            ApiError::ProbeTimeout => json_error(StatusCode::GATEWAY_TIMEOUT, &self.to_string()),
            ApiError::Internal(msg) => {
                error!(error = %msg, "internal error");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateEmail => ApiError::DuplicateEmail,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::InvalidSession => ApiError::InvalidToken,
            AuthError::NotFound => ApiError::NotFound("User"),
            AuthError::Hash(m) | AuthError::Token(m) | AuthError::Repository(m) => {
                ApiError::Internal(m)
            }
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::NotFound => ApiError::NotFound("Tracker"),
            TrackerError::Db(m) => ApiError::Internal(m),
        }
    }
}

impl From<ProbeError> for ApiError {
    fn from(e: ProbeError) -> Self {
        match e {
            ProbeError::Navigation(m) => ApiError::Navigation(m),
            ProbeError::SelectorNotFound(m) => ApiError::SelectorNotFound(m),
            ProbeError::Timeout => ApiError::ProbeTimeout,
            ProbeError::Browser(m) => ApiError::Internal(m),
        }
    }
}
