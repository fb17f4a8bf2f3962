//! Booking error taxonomy
//!
//! Every failure a member can hit while booking is folded into one of these
//! variants. `Display` is the text shown to the member; backend codes stay in
//! the logs.

use crate::ClientError;
use http::StatusCode;
use shared::error::{AppError, ErrorCategory, ErrorCode};
use shared::models::{Booking, EligibilityIssue};
use thiserror::Error;

const SERVER_MESSAGE: &str = "The club server had a problem. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Slot taken between query and submission
    #[error("{0}")]
    Conflict(String),

    /// Medical or financial gate
    #[error("{0}")]
    Eligibility(String),

    /// Request rejected as malformed or against a booking rule
    #[error("{0}")]
    Validation(String),

    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    #[error("Could not reach the club. Check your connection and try again.")]
    Network,

    #[error("{0}")]
    Server(String),

    /// Request accepted but its response could not be read
    #[error("Your booking may have been created. Check your bookings before trying again.")]
    Unconfirmed,
}

impl BookingError {
    /// The member can resubmit as is
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::Server(_) | Self::Conflict(_))
    }

    /// Humanized message for a failed read (availability, profile)
    pub fn from_load(err: &ClientError) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized
        } else if err.is_retryable() || matches!(err, ClientError::Http(_)) {
            Self::Network
        } else {
            Self::Server(SERVER_MESSAGE.to_string())
        }
    }
}

impl From<EligibilityIssue> for BookingError {
    fn from(issue: EligibilityIssue) -> Self {
        Self::Eligibility(issue.to_string())
    }
}

impl From<ClientError> for BookingError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => {
                tracing::debug!(error = %e, "Transport failure");
                Self::Network
            }
            ClientError::Api { status, error } => {
                let AppError { code, message, .. } = error;
                if status == StatusCode::CONFLICT || code.is_conflict() {
                    return Self::Conflict(message);
                }
                if status == StatusCode::UNAUTHORIZED {
                    return Self::Unauthorized;
                }
                match (code, code.category()) {
                    (ErrorCode::NetworkError | ErrorCode::TimeoutError, _) => Self::Network,
                    (ErrorCode::MembershipInactive | ErrorCode::AccountDisabled, _)
                    | (_, ErrorCategory::Eligibility | ErrorCategory::Payment) => {
                        Self::Eligibility(message)
                    }
                    (_, ErrorCategory::Auth) => Self::Unauthorized,
                    (_, ErrorCategory::System) => {
                        tracing::warn!(%code, %status, "Server error: {}", message);
                        Self::Server(SERVER_MESSAGE.to_string())
                    }
                    (_, ErrorCategory::General) => {
                        tracing::warn!(%code, "Booking request rejected as invalid: {}", message);
                        Self::Validation(message)
                    }
                    _ => Self::Validation(message),
                }
            }
            ClientError::InvalidResponse(detail) => {
                tracing::warn!(%detail, "Unexpected response");
                Self::Server(SERVER_MESSAGE.to_string())
            }
            ClientError::Serialization(e) => {
                tracing::warn!(error = %e, "Undecodable response");
                Self::Server(SERVER_MESSAGE.to_string())
            }
            ClientError::Config(detail) => {
                tracing::error!(%detail, "Client misconfigured");
                Self::Network
            }
        }
    }
}

/// Result of one `POST /bookings`
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Booking),
    /// Backend says the slot is gone; never fatal
    Conflict { message: String },
    Failed(BookingError),
}

impl SubmitOutcome {
    pub fn from_result(result: Result<Booking, ClientError>) -> Self {
        match result {
            Ok(booking) => Self::Created(booking),
            // Only a 2xx body reaches the decoder
            Err(ClientError::Serialization(e)) => {
                tracing::warn!(error = %e, "Booking accepted but its response could not be decoded");
                Self::Failed(BookingError::Unconfirmed)
            }
            Err(err) => match BookingError::from(err) {
                BookingError::Conflict(message) => Self::Conflict { message },
                other => Self::Failed(other),
            },
        }
    }
}
