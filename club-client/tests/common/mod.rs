// club-client/tests/common/mod.rs
// Fixtures shared by the wiremock-backed tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use club_client::booking::BookingHoldController;
use club_client::clock::FixedClock;
use club_client::notify::{Notification, Notifier};
use club_client::{ClientConfig, ClubApi, Facility, NetworkHttpClient, SlotKey};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()))
}

pub fn key(start: u32, end: u32) -> SlotKey {
    SlotKey::new(
        NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
    )
}

pub fn facility_json(status: &str) -> Value {
    json!({
        "id": 1,
        "name": "Cancha 1",
        "category": "padel",
        "capacity": 4,
        "hourly_rate": "12000.00",
        "open_time": "08:00",
        "close_time": "23:00",
        "status": status
    })
}

pub fn facility(status: &str) -> Facility {
    serde_json::from_value(facility_json(status)).unwrap()
}

/// Cancha 1: 10:00 free, 11:00 taken
pub fn cancha_slots() -> Value {
    json!({"data": [
        {"start_time": "11:00", "end_time": "12:00", "status": "booked"},
        {"start_time": "10:00", "end_time": "11:00", "status": "available"}
    ]})
}

pub fn cancha_slots_after_conflict() -> Value {
    json!({"data": [
        {"start_time": "10:00", "end_time": "11:00", "status": "booked"},
        {"start_time": "11:00", "end_time": "12:00", "status": "booked"}
    ]})
}

pub fn profile_json(certificate: &str) -> Value {
    json!({
        "data": {
            "id": 7,
            "name": "Ana",
            "email": "ana@club.test",
            "medical_certificate": certificate,
            "medical_certificate_expires_on": "2027-03-01",
            "balance": "0"
        }
    })
}

pub fn booking_json(status: &str) -> Value {
    json!({
        "id": 901,
        "facility_id": 1,
        "facility_name": "Cancha 1",
        "user_id": 7,
        "start_time": "2026-10-19T10:00:00Z",
        "end_time": "2026-10-19T11:00:00Z",
        "total_price": "12000.00",
        "status": status,
        "payment_expiry": "2026-10-19T09:15:00Z"
    })
}

/// Notifier that keeps everything it is told
#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
    pub bookings_changed: Mutex<usize>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn bookings_changed_count(&self) -> usize {
        *self.bookings_changed.lock().unwrap()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    fn bookings_changed(&self) {
        *self.bookings_changed.lock().unwrap() += 1;
    }
}

pub fn api(server: &MockServer) -> ClubApi<NetworkHttpClient> {
    let http = ClientConfig::new(server.uri())
        .with_timeout(5)
        .build_http_client()
        .unwrap();
    ClubApi::new(http)
}

pub fn controller(
    server: &MockServer,
) -> (BookingHoldController<NetworkHttpClient>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = BookingHoldController::new(api(server), notifier.clone()).with_clock(clock());
    (controller, notifier)
}
