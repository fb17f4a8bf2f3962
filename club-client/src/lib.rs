//! Club Client - booking client for the club backend
//!
//! Endpoint clients over a reqwest transport, plus the booking hold
//! controller that drives a booking dialog from slot selection to a
//! confirmed (or pending payment) booking.

pub mod api;
pub mod booking;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod notify;

pub use api::ClubApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use self::http::{HttpClient, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::models::{
    Booking, BookingStatus, Facility, FacilityStatus, Slot, SlotKey, SlotStatus, UserProfile,
};
