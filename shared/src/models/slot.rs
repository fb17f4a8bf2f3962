//! Slot Model

use crate::time::{clock_time, format_time_range};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Slot availability as reported by the backend at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    #[serde(alias = "reserved", alias = "unavailable")]
    Booked,
}

/// Identity of a slot within one facility and date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotKey {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// `10:00–11:00`
    pub fn label(&self) -> String {
        format_time_range(self.start, self.end)
    }
}

/// One bookable interval of a facility on the queried date
///
/// Never cached beyond the view that requested it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub status: SlotStatus,
}

impl Slot {
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.start_time, self.end_time)
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }

    pub fn label(&self) -> String {
        self.key().label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_slots() {
        let slots: Vec<Slot> = serde_json::from_str(
            r#"[
                {"start_time":"10:00","end_time":"11:00","status":"available"},
                {"start_time":"11:00:00","end_time":"12:00:00","status":"booked"},
                {"start_time":"2026-10-19T12:00:00Z","end_time":"2026-10-19T13:00:00Z","status":"reserved"}
            ]"#,
        )
        .unwrap();

        assert!(slots[0].is_available());
        assert!(!slots[1].is_available());
        assert_eq!(slots[2].status, SlotStatus::Booked);
        assert_eq!(slots[0].label(), "10:00–11:00");
        assert_eq!(slots[2].label(), "12:00–13:00");
    }

    #[test]
    fn test_slot_key_ordering() {
        let a = SlotKey::new(
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        );
        let b = SlotKey::new(
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        );
        assert!(a < b);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let res = serde_json::from_str::<Slot>(
            r#"{"start_time":"10:00","end_time":"11:00","status":"maybe"}"#,
        );
        assert!(res.is_err());
    }
}
