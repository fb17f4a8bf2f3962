//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Carries what the backend reported about a failed request:
/// - Standardized error code via [`ErrorCode`]
/// - Human-readable message
/// - Optional structured details (field errors, the slot that conflicted, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Build an error from a decoded error body
    ///
    /// Unknown or missing codes fall back to a code derived from the HTTP
    /// status, so callers can always classify the failure.
    pub fn from_response(status: StatusCode, body: ApiResponse<Value>) -> Self {
        let code = body
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .filter(|c| !c.is_success())
            .unwrap_or_else(|| Self::code_for_status(status));

        let message = if body.message.trim().is_empty() {
            code.message().to_string()
        } else {
            body.message
        };

        Self {
            code,
            message,
            details: body.details,
        }
    }

    /// Best-effort error code for a bare HTTP status
    pub fn code_for_status(status: StatusCode) -> ErrorCode {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ErrorCode::ValidationFailed
            }
            StatusCode::UNAUTHORIZED => ErrorCode::NotAuthenticated,
            StatusCode::FORBIDDEN => ErrorCode::PermissionDenied,
            StatusCode::NOT_FOUND => ErrorCode::NotFound,
            StatusCode::CONFLICT => ErrorCode::SlotUnavailable,
            StatusCode::PAYMENT_REQUIRED => ErrorCode::InsufficientBalance,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ErrorCode::TimeoutError,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ErrorCode::ServiceUnavailable
            }
            s if s.is_server_error() => ErrorCode::InternalError,
            _ => ErrorCode::Unknown,
        }
    }
}

/// Unified API response structure
///
/// The backend wraps payloads and errors in this shape; the client only
/// ever decodes it:
/// - `code`: Error code (0 or absent for success)
/// - `message`: Human-readable message (older endpoints send `error`)
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default, alias = "error")]
    pub message: String,
    /// Response data (present on success)
    #[serde(default)]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(default)]
    pub details: Option<HashMap<String, Value>>,
}
