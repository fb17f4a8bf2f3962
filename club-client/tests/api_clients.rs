// club-client/tests/api_clients.rs
// Endpoint clients against a mock backend

mod common;

use chrono::NaiveDate;
use club_client::booking::{BookingError, SubmitOutcome};
use club_client::{BookingStatus, ClientConfig, ClientError, SlotStatus};
use common::*;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::BookingCreate;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_facilities_accept_bare_and_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            facility_json("active"),
            {"id": 2, "name": "Pileta", "capacity": 10, "hourly_rate": "5000",
             "open_time": "07:00", "close_time": "21:00", "status": "maintenance"}
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [facility_json("active")]})),
        )
        .mount(&server)
        .await;

    let facilities = api(&server).facilities();
    let all = facilities.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(!all[1].is_bookable());

    let wrapped = facilities.list().await.unwrap();
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0].name, "Cancha 1");
}

#[tokio::test]
async fn test_invalid_facility_records_are_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            facility_json("active"),
            {"id": 3, "name": "Broken", "capacity": 0, "hourly_rate": "1",
             "open_time": "08:00", "close_time": "09:00", "status": "active"}
        ]})))
        .mount(&server)
        .await;

    let bookable = api(&server).facilities().bookable().await.unwrap();
    assert_eq!(bookable.len(), 1);
    assert_eq!(bookable[0].id, "1");
}

#[tokio::test]
async fn test_availability_is_sorted_and_queried_by_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/availability"))
        .and(query_param("facility_id", "1"))
        .and(query_param("date", "2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cancha_slots()))
        .expect(1)
        .mount(&server)
        .await;

    let slots = api(&server).availability().slots("1", today()).await.unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].label(), "10:00–11:00");
    assert_eq!(slots[0].status, SlotStatus::Available);
    assert_eq!(slots[1].status, SlotStatus::Booked);
}

#[tokio::test]
async fn test_empty_availability_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let slots = api(&server).availability().slots("1", today()).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_availability_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/availability"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = api(&server).availability().slots("1", today()).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.code(), Some(ErrorCode::ServiceUnavailable));
}

#[tokio::test]
async fn test_unreachable_backend_is_retryable() {
    // Nothing listens on port 9 (discard) in the test environment
    let http = ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let err = club_client::ClubApi::new(http)
        .availability()
        .slots("1", today())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_availability_for_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cancha_slots()))
        .expect(3)
        .mount(&server)
        .await;

    let to = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
    let days = api(&server).availability().for_range("1", today(), to).await.unwrap();
    let dates: Vec<NaiveDate> = days.iter().map(|(d, _)| *d).collect();
    assert_eq!(dates.len(), 3);
    assert_eq!(dates[0], today());
    assert_eq!(dates[2], to);

    let none = api(&server).availability().for_range("1", to, today()).await.unwrap();
    assert!(none.is_empty());
}

fn create_request() -> BookingCreate {
    BookingCreate {
        facility_id: "1".into(),
        date: today(),
        start_time: key(10, 11).start,
        end_time: key(10, 11).end,
        guests: None,
    }
}

#[tokio::test]
async fn test_create_sends_one_request_and_decodes_booking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({
            "facility_id": "1",
            "date": "2026-10-19",
            "start_time": "10:00",
            "end_time": "11:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(booking_json("CONFIRMED")))
        .expect(1)
        .mount(&server)
        .await;

    match api(&server).bookings().create(&create_request()).await {
        SubmitOutcome::Created(booking) => {
            assert_eq!(booking.id, "901");
            assert_eq!(booking.status, BookingStatus::Confirmed);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_conflict_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": 4002,
            "message": "This time slot is no longer available"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = api(&server).bookings().create(&create_request()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Conflict {
            message: "This time slot is no longer available".into()
        }
    );
}

#[tokio::test]
async fn test_create_conflict_code_without_409() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"code": 4003, "error": "Overlaps"})),
        )
        .mount(&server)
        .await;

    let outcome = api(&server).bookings().create(&create_request()).await;
    assert!(matches!(outcome, SubmitOutcome::Conflict { .. }));
}

#[tokio::test]
async fn test_create_failures_are_classified_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 7002,
            "message": "Your medical certificate has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = api(&server).bookings().create(&create_request()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(BookingError::Eligibility(
            "Your medical certificate has expired".into()
        ))
    );
}

#[tokio::test]
async fn test_create_server_error_is_humanized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let SubmitOutcome::Failed(err) = api(&server).bookings().create(&create_request()).await else {
        panic!("expected failure");
    };
    assert!(matches!(err, BookingError::Server(_)));
    assert!(!err.to_string().contains("500"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_create_accepted_with_unreadable_body_is_unconfirmed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_string("<html>created</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = api(&server).bookings().create(&create_request()).await;
    assert_eq!(outcome, SubmitOutcome::Failed(BookingError::Unconfirmed));
}

#[tokio::test]
async fn test_booking_lists_and_cancel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [booking_json("PENDING_PAYMENT")]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookings/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booking_json("CONFIRMED"),
            booking_json("NO_SHOW")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bookings/901/cancel"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": booking_json("CANCELLED")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bookings = api(&server).bookings();
    let mine = bookings.mine().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(mine[0].pending_payment_deadline().is_some());

    let all = bookings.all().await.unwrap();
    assert_eq!(all[1].status, BookingStatus::NoShow);

    let cancelled = bookings.cancel("901").await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_me_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("valid")))
        .expect(1)
        .mount(&server)
        .await;

    let http = ClientConfig::new(server.uri())
        .with_token("s3cret")
        .build_http_client()
        .unwrap();
    let me = club_client::ClubApi::new(http).users().me().await.unwrap();
    assert_eq!(me.name, "Ana");
    assert_eq!(me.eligibility(today()), Ok(()));
}

#[tokio::test]
async fn test_unauthorized_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = api(&server).users().me().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!err.is_retryable());
    assert_eq!(err.code(), Some(ErrorCode::NotAuthenticated));
}
