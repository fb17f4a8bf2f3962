//! Unified error codes for the club platform
//!
//! This module defines the error codes the backend reports in error bodies.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Club (tenant) errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 6xxx: Facility errors
//! - 7xxx: Eligibility errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they travel unchanged
/// between the backend, this client and any UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Session has expired
    SessionExpired = 1002,
    /// Account is disabled
    AccountDisabled = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Club admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Club ====================
    /// Club not found
    ClubNotFound = 3001,
    /// Membership is not active
    MembershipInactive = 3002,
    /// Feature not enabled for this club
    FeatureNotAvailable = 3003,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Requested slot is no longer available
    SlotUnavailable = 4002,
    /// Booking overlaps an existing booking
    BookingConflict = 4003,
    /// Booking payment window expired
    BookingExpired = 4004,
    /// Booking already cancelled
    BookingAlreadyCancelled = 4005,
    /// Requested time is outside operating hours
    OutsideOperatingHours = 4006,
    /// Booking too far in advance
    BookingTooFarAhead = 4007,
    /// Cancellation window has closed
    CancellationWindowClosed = 4008,
    /// Booking limit per member reached
    BookingLimitReached = 4009,

    // ==================== 5xxx: Payment ====================
    /// Payment failed
    PaymentFailed = 5001,
    /// Insufficient balance
    InsufficientBalance = 5002,
    /// Checkout session expired
    CheckoutExpired = 5003,

    // ==================== 6xxx: Facility ====================
    /// Facility not found
    FacilityNotFound = 6001,
    /// Facility is under maintenance
    FacilityInMaintenance = 6002,
    /// Facility is closed
    FacilityClosed = 6003,

    // ==================== 7xxx: Eligibility ====================
    /// No medical certificate on file
    MedicalCertificateMissing = 7001,
    /// Medical certificate expired
    MedicalCertificateExpired = 7002,
    /// Medical certificate awaiting review
    MedicalCertificatePending = 7003,
    /// Member has outstanding debt
    OutstandingDebt = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Request timed out
    TimeoutError = 9004,
    /// Service temporarily unavailable
    ServiceUnavailable = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Whether the backend uses this code to reject a slot taken by someone else
    #[inline]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, ErrorCode::SlotUnavailable | ErrorCode::BookingConflict)
    }

    /// Get the user-facing message for this error code
    ///
    /// These strings are safe to show to members as-is.
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "Something went wrong, please try again",
            ErrorCode::ValidationFailed => "Some of the submitted data is not valid",
            ErrorCode::NotFound => "The requested item could not be found",
            ErrorCode::AlreadyExists => "This item already exists",
            ErrorCode::InvalidRequest => "The request could not be processed",
            ErrorCode::RequiredField => "A required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Please sign in to continue",
            ErrorCode::SessionExpired => "Your session has expired, please sign in again",
            ErrorCode::AccountDisabled => "Your account is disabled, contact the club",

            // Permission
            ErrorCode::PermissionDenied => "You do not have permission to do this",
            ErrorCode::AdminRequired => "Only club administrators can do this",

            // Club
            ErrorCode::ClubNotFound => "Club not found",
            ErrorCode::MembershipInactive => "Your membership is not active",
            ErrorCode::FeatureNotAvailable => "This feature is not enabled for your club",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::SlotUnavailable => "This time slot is no longer available",
            ErrorCode::BookingConflict => "This time slot was just booked by someone else",
            ErrorCode::BookingExpired => "The payment window for this booking has expired",
            ErrorCode::BookingAlreadyCancelled => "This booking was already cancelled",
            ErrorCode::OutsideOperatingHours => "The facility is closed at that time",
            ErrorCode::BookingTooFarAhead => "Bookings cannot be made that far in advance",
            ErrorCode::CancellationWindowClosed => "This booking can no longer be cancelled",
            ErrorCode::BookingLimitReached => "You have reached your booking limit",

            // Payment
            ErrorCode::PaymentFailed => "The payment could not be completed",
            ErrorCode::InsufficientBalance => "Your balance is not enough for this booking",
            ErrorCode::CheckoutExpired => "The checkout session has expired",

            // Facility
            ErrorCode::FacilityNotFound => "Facility not found",
            ErrorCode::FacilityInMaintenance => "This facility is under maintenance",
            ErrorCode::FacilityClosed => "This facility is closed",

            // Eligibility
            ErrorCode::MedicalCertificateMissing => {
                "Upload a medical certificate before booking"
            }
            ErrorCode::MedicalCertificateExpired => {
                "Your medical certificate has expired, upload a new one to book"
            }
            ErrorCode::MedicalCertificatePending => {
                "Your medical certificate is still being reviewed"
            }
            ErrorCode::OutstandingDebt => "Settle your outstanding balance before booking",

            // System
            ErrorCode::InternalError => "The server had a problem, please try again",
            ErrorCode::DatabaseError => "The server had a problem, please try again",
            ErrorCode::NetworkError => "Could not reach the server, check your connection",
            ErrorCode::TimeoutError => "The server took too long to answer, please try again",
            ErrorCode::ServiceUnavailable => "The service is temporarily unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::SessionExpired),
            1003 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Club
            3001 => Ok(ErrorCode::ClubNotFound),
            3002 => Ok(ErrorCode::MembershipInactive),
            3003 => Ok(ErrorCode::FeatureNotAvailable),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::SlotUnavailable),
            4003 => Ok(ErrorCode::BookingConflict),
            4004 => Ok(ErrorCode::BookingExpired),
            4005 => Ok(ErrorCode::BookingAlreadyCancelled),
            4006 => Ok(ErrorCode::OutsideOperatingHours),
            4007 => Ok(ErrorCode::BookingTooFarAhead),
            4008 => Ok(ErrorCode::CancellationWindowClosed),
            4009 => Ok(ErrorCode::BookingLimitReached),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::InsufficientBalance),
            5003 => Ok(ErrorCode::CheckoutExpired),

            // Facility
            6001 => Ok(ErrorCode::FacilityNotFound),
            6002 => Ok(ErrorCode::FacilityInMaintenance),
            6003 => Ok(ErrorCode::FacilityClosed),

            // Eligibility
            7001 => Ok(ErrorCode::MedicalCertificateMissing),
            7002 => Ok(ErrorCode::MedicalCertificateExpired),
            7003 => Ok(ErrorCode::MedicalCertificatePending),
            7004 => Ok(ErrorCode::OutstandingDebt),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ServiceUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
