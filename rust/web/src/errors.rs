/// Error handling for arcana_web
///
/// This module provides:
/// - The JSON error body shared by every endpoint
/// - HTTP status code mappings for draw errors
/// - Error logging by severity
use arcana_engine::{DrawError, SpreadRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Standard error response format for all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "spread_not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (structured data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Convert to HTTP response with specified status code
    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Client errors (4xx) - expected, normal operation
    Client,
    /// Server errors (5xx) - unexpected, needs investigation
    Server,
    /// Critical errors - catalog integrity at risk
    Critical,
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error code
    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    /// Convert to HTTP response with logging
    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let severity = self.severity();
        let error_response = self.to_error_response();

        match severity {
            ErrorSeverity::Client => log_client_error(&error_response),
            ErrorSeverity::Server => log_server_error(&error_response),
            ErrorSeverity::Critical => log_critical_error(&error_response),
        }

        error_response.into_response(status)
    }
}

fn log_client_error(error: &ErrorResponse) {
    tracing::info!(code = %error.error, message = %error.message, "client error");
}

fn log_server_error(error: &ErrorResponse) {
    tracing::error!(code = %error.error, message = %error.message, "server error");
}

fn log_critical_error(error: &ErrorResponse) {
    tracing::error!(
        code = %error.error,
        message = %error.message,
        critical = true,
        "critical error"
    );
}

impl IntoErrorResponse for DrawError {
    fn status_code(&self) -> StatusCode {
        match self {
            DrawError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            DrawError::SpreadNotFound(_) => StatusCode::NOT_FOUND,
            DrawError::SpreadCardCountMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DrawError::UnknownCard(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DrawError::InvalidParameter(_) => "invalid_parameter",
            DrawError::SpreadNotFound(_) => "spread_not_found",
            DrawError::SpreadCardCountMismatch { .. } => "spread_card_count_mismatch",
            DrawError::UnknownCard(_) => "internal_error",
        }
    }

    fn error_message(&self) -> String {
        match self {
            // the card id is an internal detail
            DrawError::UnknownCard(_) => "Card catalog is inconsistent".to_string(),
            other => other.to_string(),
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            DrawError::SpreadNotFound(id) => {
                let available: Vec<&str> = SpreadRegistry::standard()
                    .list()
                    .iter()
                    .map(|s| s.id.as_str())
                    .collect();
                Some(serde_json::json!({ "spread": id, "available": available }))
            }
            DrawError::SpreadCardCountMismatch {
                spread,
                expected,
                actual,
            } => Some(serde_json::json!({
                "spread": spread,
                "expected": expected,
                "actual": actual,
            })),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            DrawError::UnknownCard(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Client,
        }
    }
}

/// Failures of the readings endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Malformed request body: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error("Reading task failed: {0}")]
    TaskFailed(String),
}

impl IntoErrorResponse for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Draw(e) => e.status_code(),
            ApiError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Draw(e) => e.error_code(),
            ApiError::TaskFailed(_) => "internal_error",
        }
    }

    fn error_message(&self) -> String {
        match self {
            ApiError::Draw(e) => e.error_message(),
            other => other.to_string(),
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Draw(e) => e.error_details(),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::InvalidRequest(_) => ErrorSeverity::Client,
            ApiError::Draw(e) => e.severity(),
            ApiError::TaskFailed(_) => ErrorSeverity::Server,
        }
    }
}
