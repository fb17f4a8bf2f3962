//! Facility Model

use crate::money::amount;
use crate::time::clock_time;
use crate::util::id_string;
use chrono::{NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Facility lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityStatus {
    Active,
    Maintenance,
    Closed,
}

/// Same-day opening hours, `open < close`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl OperatingHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, FacilityError> {
        if open >= close {
            return Err(FacilityError::InvalidHours { open, close });
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Whether `[start, end)` fits inside the opening hours
    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.open && end <= self.close && start < end
    }
}

/// Facility record rejected while decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacilityError {
    #[error("facility capacity must be greater than zero")]
    ZeroCapacity,
    #[error("facility hourly rate cannot be negative: {0}")]
    NegativeRate(Decimal),
    #[error("opening time {open} must be before closing time {close}")]
    InvalidHours { open: NaiveTime, close: NaiveTime },
}

/// Bookable facility (court, pool lane, field...)
///
/// Read-only on the client; created and edited through the admin workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FacilityRecord", into = "FacilityRecord")]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub category: String,
    pub capacity: u32,
    pub hourly_rate: Decimal,
    pub hours: OperatingHours,
    pub status: FacilityStatus,
}

impl Facility {
    /// Only active facilities accept new bookings
    pub fn is_bookable(&self) -> bool {
        self.status == FacilityStatus::Active
    }

    /// Price of a `[start, end)` booking at the hourly rate
    pub fn price_for(&self, start: NaiveTime, end: NaiveTime) -> Decimal {
        let minutes = (end - start).max(TimeDelta::zero()).num_minutes();
        self.hourly_rate * Decimal::from(minutes) / Decimal::from(60)
    }
}

/// Wire shape of a facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRecord {
    #[serde(deserialize_with = "id_string")]
    id: String,
    name: String,
    #[serde(default)]
    category: String,
    capacity: u32,
    #[serde(with = "amount")]
    hourly_rate: Decimal,
    #[serde(with = "clock_time")]
    open_time: NaiveTime,
    #[serde(with = "clock_time")]
    close_time: NaiveTime,
    status: FacilityStatus,
}

impl TryFrom<FacilityRecord> for Facility {
    type Error = FacilityError;

    fn try_from(raw: FacilityRecord) -> Result<Self, Self::Error> {
        if raw.capacity == 0 {
            return Err(FacilityError::ZeroCapacity);
        }
        if raw.hourly_rate < Decimal::ZERO {
            return Err(FacilityError::NegativeRate(raw.hourly_rate));
        }
        Ok(Self {
            hours: OperatingHours::new(raw.open_time, raw.close_time)?,
            id: raw.id,
            name: raw.name,
            category: raw.category,
            capacity: raw.capacity,
            hourly_rate: raw.hourly_rate,
            status: raw.status,
        })
    }
}

impl From<Facility> for FacilityRecord {
    fn from(f: Facility) -> Self {
        Self {
            id: f.id,
            name: f.name,
            category: f.category,
            capacity: f.capacity,
            hourly_rate: f.hourly_rate,
            open_time: f.hours.open,
            close_time: f.hours.close,
            status: f.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const CANCHA: &str = r#"{
        "id": 1,
        "name": "Cancha 1",
        "category": "padel",
        "capacity": 4,
        "hourly_rate": "12000.00",
        "open_time": "08:00",
        "close_time": "23:00",
        "status": "active"
    }"#;

    #[test]
    fn test_decode_facility() {
        let f: Facility = serde_json::from_str(CANCHA).unwrap();
        assert_eq!(f.id, "1");
        assert_eq!(f.name, "Cancha 1");
        assert_eq!(f.capacity, 4);
        assert_eq!(f.hourly_rate, Decimal::from_str("12000").unwrap());
        assert_eq!(f.hours.open(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert!(f.is_bookable());
    }

    #[test]
    fn test_non_active_is_not_bookable() {
        for status in ["maintenance", "closed"] {
            let json = CANCHA.replace("\"active\"", &format!("\"{status}\""));
            let f: Facility = serde_json::from_str(&json).unwrap();
            assert!(!f.is_bookable(), "{status} should not be bookable");
        }
    }

    #[test]
    fn test_rejects_invalid_records() {
        let zero = CANCHA.replace("\"capacity\": 4", "\"capacity\": 0");
        assert!(serde_json::from_str::<Facility>(&zero).is_err());

        let negative = CANCHA.replace("\"12000.00\"", "\"-1\"");
        assert!(serde_json::from_str::<Facility>(&negative).is_err());

        let inverted = CANCHA.replace("\"08:00\"", "\"23:30\"");
        assert!(serde_json::from_str::<Facility>(&inverted).is_err());
    }

    #[test]
    fn test_price_for_slot() {
        let f: Facility = serde_json::from_str(CANCHA).unwrap();
        let start = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(11, 30, 0).unwrap();
        assert_eq!(f.price_for(start, end), Decimal::from(18000));
        assert_eq!(f.price_for(end, start), Decimal::ZERO);
    }

    #[test]
    fn test_serialize_flat_shape() {
        let f: Facility = serde_json::from_str(CANCHA).unwrap();
        let value = serde_json::to_value(&f).unwrap();
        assert_eq!(value["open_time"], "08:00");
        assert_eq!(value["status"], "active");
        let back: Facility = serde_json::from_value(value).unwrap();
        assert_eq!(back, f);
    }
}
