//! Bookings (`/bookings`)

use crate::booking::SubmitOutcome;
use crate::{ClientResult, HttpClient};
use shared::models::{Booking, BookingCreate};
use shared::response::{ItemEnvelope, ListEnvelope};
use std::sync::Arc;

#[derive(Debug)]
pub struct BookingsClient<H> {
    http: Arc<H>,
}

impl<H: HttpClient> BookingsClient<H> {
    pub fn new(http: Arc<H>) -> Self {
        Self { http }
    }

    /// Send exactly one creation request
    ///
    /// Never retried here: a retry after a lost response could create a
    /// second booking.
    pub async fn create(&self, request: &BookingCreate) -> SubmitOutcome {
        tracing::info!(
            facility_id = %request.facility_id,
            date = %request.date,
            start = %request.start_time,
            end = %request.end_time,
            "Submitting booking"
        );
        let result = self
            .http
            .post::<ItemEnvelope<Booking>, _>("bookings", request)
            .await
            .map(ItemEnvelope::into_inner);

        let outcome = SubmitOutcome::from_result(result);
        match &outcome {
            SubmitOutcome::Created(b) => tracing::info!(booking_id = %b.id, status = ?b.status, "Booking created"),
            SubmitOutcome::Conflict { message } => tracing::info!(%message, "Booking conflict"),
            SubmitOutcome::Failed(e) => tracing::warn!(error = %e, "Booking failed"),
        }
        outcome
    }

    /// Bookings of the current member
    pub async fn mine(&self) -> ClientResult<Vec<Booking>> {
        let raw: ListEnvelope<Booking> = self.http.get("bookings").await?;
        Ok(raw.into_vec())
    }

    /// Every booking of the club (staff only)
    pub async fn all(&self) -> ClientResult<Vec<Booking>> {
        let raw: ListEnvelope<Booking> = self.http.get("bookings/all").await?;
        Ok(raw.into_vec())
    }

    /// Ask the backend to cancel a booking; returns the updated record
    pub async fn cancel(&self, booking_id: &str) -> ClientResult<Booking> {
        tracing::info!(booking_id, "Requesting cancellation");
        let raw: ItemEnvelope<Booking> = self
            .http
            .post_empty(&format!("bookings/{booking_id}/cancel"))
            .await?;
        Ok(raw.into_inner())
    }
}
