//! Facility directory (`GET /facilities`)

use crate::{ClientResult, HttpClient};
use serde_json::Value;
use shared::models::Facility;
use shared::response::ListEnvelope;
use std::sync::Arc;

#[derive(Debug)]
pub struct FacilityClient<H> {
    http: Arc<H>,
}

impl<H: HttpClient> FacilityClient<H> {
    pub fn new(http: Arc<H>) -> Self {
        Self { http }
    }

    /// All facilities of the club
    ///
    /// Records that fail validation (zero capacity, inverted hours...) are
    /// logged and skipped rather than failing the whole directory.
    pub async fn list(&self) -> ClientResult<Vec<Facility>> {
        let raw: ListEnvelope<Value> = self.http.get("facilities").await?;
        let facilities: Vec<Facility> = raw
            .into_vec()
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Facility>(item) {
                Ok(facility) => Some(facility),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping invalid facility record");
                    None
                }
            })
            .collect();
        tracing::debug!(count = facilities.len(), "Loaded facilities");
        Ok(facilities)
    }

    /// Facilities currently accepting bookings
    pub async fn bookable(&self) -> ClientResult<Vec<Facility>> {
        let mut facilities = self.list().await?;
        facilities.retain(Facility::is_bookable);
        Ok(facilities)
    }

    pub async fn get(&self, id: &str) -> ClientResult<Option<Facility>> {
        Ok(self.list().await?.into_iter().find(|f| f.id == id))
    }
}
