//! Booking Model

use crate::money::amount;
use crate::time::clock_time;
use crate::util::id_string;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking status, owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    PendingPayment,
    Confirmed,
    Cancelled,
    Expired,
    Completed,
    NoShow,
}

impl BookingStatus {
    /// No further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Expired | Self::Completed | Self::NoShow
        )
    }

    /// Member may still ask for a cancellation
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::PendingPayment | Self::Confirmed)
    }
}

/// Extra charge for non-member guests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCost {
    pub guests: u32,
    #[serde(with = "amount")]
    pub price_per_guest: Decimal,
    #[serde(with = "amount")]
    pub total: Decimal,
}

impl GuestCost {
    /// Whether `total == guests * price_per_guest`
    pub fn is_consistent(&self) -> bool {
        Decimal::from(self.guests) * self.price_per_guest == self.total
    }
}

/// Durable booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub facility_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_name: Option<String>,
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(with = "amount")]
    pub total_price: Decimal,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_cost: Option<GuestCost>,
}

impl Booking {
    /// Payment deadline, only while the booking still waits for payment
    pub fn pending_payment_deadline(&self) -> Option<DateTime<Utc>> {
        match self.status {
            BookingStatus::PendingPayment => self.payment_expiry,
            _ => None,
        }
    }
}

/// Create booking payload (`POST /bookings`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCreate {
    pub facility_id: String,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
}
