//! Endpoint clients
//!
//! One small client per backend resource. Each decodes its payload through a
//! single envelope adapter so callers only ever see domain types.

pub mod availability;
pub mod bookings;
pub mod facilities;
pub mod users;

pub use availability::AvailabilityClient;
pub use bookings::BookingsClient;
pub use facilities::FacilityClient;
pub use users::UserClient;

use crate::HttpClient;
use std::sync::Arc;

/// Entry point bundling every endpoint client over one transport
#[derive(Debug)]
pub struct ClubApi<H> {
    http: Arc<H>,
}

impl<H> Clone for ClubApi<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<H: HttpClient> ClubApi<H> {
    pub fn new(http: H) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn facilities(&self) -> FacilityClient<H> {
        FacilityClient::new(Arc::clone(&self.http))
    }

    pub fn availability(&self) -> AvailabilityClient<H> {
        AvailabilityClient::new(Arc::clone(&self.http))
    }

    pub fn bookings(&self) -> BookingsClient<H> {
        BookingsClient::new(Arc::clone(&self.http))
    }

    pub fn users(&self) -> UserClient<H> {
        UserClient::new(Arc::clone(&self.http))
    }
}
