//! Availability queries (`GET /bookings/availability`)

use crate::{ClientResult, HttpClient};
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::Slot;
use shared::response::ListEnvelope;
use std::sync::Arc;

#[derive(Serialize)]
struct AvailabilityQuery<'a> {
    facility_id: &'a str,
    date: NaiveDate,
}

#[derive(Debug)]
pub struct AvailabilityClient<H> {
    http: Arc<H>,
}

impl<H: HttpClient> AvailabilityClient<H> {
    pub fn new(http: Arc<H>) -> Self {
        Self { http }
    }

    /// Slots of one facility on one date, ordered by start time
    ///
    /// An empty list means the facility has no opening hours that day.
    pub async fn slots(&self, facility_id: &str, date: NaiveDate) -> ClientResult<Vec<Slot>> {
        let query = AvailabilityQuery { facility_id, date };
        let raw: ListEnvelope<Slot> = self
            .http
            .get_with_query("bookings/availability", &query)
            .await?;

        let mut slots = raw.into_vec();
        slots.sort_by_key(|s| (s.start_time, s.end_time));
        tracing::debug!(facility_id, %date, count = slots.len(), "Loaded availability");
        Ok(slots)
    }

    /// Slots for every date in `from..=to`, one request per date
    pub async fn for_range(
        &self,
        facility_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ClientResult<Vec<(NaiveDate, Vec<Slot>)>> {
        let mut days = Vec::new();
        for date in from.iter_days().take_while(|d| *d <= to) {
            days.push((date, self.slots(facility_id, date).await?));
        }
        Ok(days)
    }
}
