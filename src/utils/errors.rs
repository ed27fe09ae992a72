//! Error handling
//!
//! Every error the HTTP surface can return lives here, together with its
//! mapping to a status code and a JSON body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::booking::BookingStatus;

/// Main application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Missing required fields")]
    MissingFields(Vec<&'static str>),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A write on the intake path failed; the message is what the caller sees.
    #[error("Submission failed: {0}")]
    SubmissionFailed(&'static str),

    #[error("Illegal status transition from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body was not JSON, or did not match the expected shape
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, code: &'static str) -> Self {
        Self {
            error: error.into(),
            details: None,
            code: Some(code),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An error occurred while accessing the database", "DB_ERROR"),
                )
            }

            AppError::MissingFields(fields) => {
                tracing::debug!("Rejected submission, missing: {:?}", fields);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Missing required fields", "MISSING_FIELDS")
                        .with_details(json!({ "fields": fields })),
                )
            }

            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("The provided data is invalid", "VALIDATION_ERROR")
                        .with_details(json!(e)),
                )
            }

            AppError::SubmissionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(msg, "SUBMISSION_FAILED"),
            ),

            AppError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    format!("Cannot move booking from '{}' to '{}'", from, to),
                    "INVALID_TRANSITION",
                )
                .with_details(json!({ "from": from, "to": to, "allowed": from.allowed_targets() })),
            ),

            AppError::Unauthorized(msg) => {
                tracing::warn!("🔒 Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg, "UNAUTHORIZED"))
            }

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg, "NOT_FOUND")),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg, "CONFLICT")),

            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, "BAD_REQUEST"))
            }

            AppError::MalformedBody(reason) => {
                tracing::debug!("Rejected body: {}", reason);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("The request body could not be read", "INVALID_BODY")
                        .with_details(json!({ "reason": reason })),
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An unexpected error occurred", "INTERNAL_ERROR"),
                )
            }

            AppError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new("Too many requests. Please try again later", "RATE_LIMIT_EXCEEDED"),
            ),

            AppError::Jwt(msg) => {
                tracing::warn!("🔒 JWT error: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("Invalid session", "JWT_ERROR"))
            }

            AppError::Hash(msg) => {
                tracing::error!("❌ Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An error occurred while processing credentials", "HASH_ERROR"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

/// Typed result for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Build a single-field validation error
pub fn validation_error(field: &'static str, code: &'static str, message: &'static str) -> AppError {
    invalid_field(field, field_error(code, message))
}

/// Wrap an already built field error
pub fn invalid_field(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Build a `ValidationError` carrying a human readable message
pub fn field_error(code: &'static str, message: &'static str) -> validator::ValidationError {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn not_found_error(resource: &str, key: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' not found", resource, key))
}

pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}
