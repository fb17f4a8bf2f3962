//! Time formatting helpers
//!
//! Display strings for slots, bookings and countdowns. Everything here is
//! pure; the current time is always passed in by the caller.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::time::Duration;
use thiserror::Error;

/// Countdown refresh period
pub const TICK: Duration = Duration::from_secs(1);

/// Error when a time-of-day string cannot be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day: {0:?}")]
pub struct TimeParseError(pub String);

/// Time left until `deadline`, clamped at zero
pub fn remaining_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (deadline - now).to_std().unwrap_or(Duration::ZERO)
}

/// Render a remaining duration as `MM:SS`
///
/// Sub-second remainders are truncated. Minutes are not wrapped into hours,
/// so a 90 minute payment window shows as `90:00`.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse a `MM:SS` countdown back into a duration
pub fn parse_countdown(text: &str) -> Option<Duration> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    let total = minutes.checked_mul(60)?.checked_add(seconds)?;
    Some(Duration::from_secs(total))
}

/// `HH:MM`
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// `10:00–11:00`
pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}–{}", format_clock(start), format_clock(end))
}

/// `19/10/2026`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// A UTC instant shown in the club's timezone, `19/10/2026 10:00`
pub fn format_local_datetime(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string()
}

/// Parse a time of day as sent by the availability endpoint
///
/// Accepts `HH:MM`, `HH:MM:SS` and full RFC 3339 timestamps (the time of
/// day of the timestamp is used as is).
pub fn parse_clock_time(text: &str) -> Result<NaiveTime, TimeParseError> {
    let text = text.trim();
    if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M") {
        return Ok(t);
    }
    if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
        return Ok(t);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.time());
    }
    Err(TimeParseError(text.to_string()))
}

/// Serde adapter for time-of-day fields (`"10:00"` on the wire)
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(serde::de::Error::custom)
    }
}
