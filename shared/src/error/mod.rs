//! Unified error system for the club platform
//!
//! This module provides the error vocabulary shared by the backend contract
//! and the client:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: What the backend reported, with code, message and details
//! - [`ApiResponse`]: The backend's response envelope, decoded on failure
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Club errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 6xxx: Facility errors
//! - 7xxx: Eligibility errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//! use shared::http::StatusCode;
//!
//! let err = AppError::new(ErrorCode::SlotUnavailable);
//! assert_eq!(err.message, "This time slot is no longer available");
//!
//! let body: ApiResponse<serde_json::Value> =
//!     serde_json::from_str(r#"{"code":7002,"message":"Certificate expired"}"#).unwrap();
//! let err = AppError::from_response(StatusCode::FORBIDDEN, body);
//! assert_eq!(err.code, ErrorCode::MedicalCertificateExpired);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
