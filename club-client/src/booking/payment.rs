//! Pending payment countdowns
//!
//! A booking created as `PENDING_PAYMENT` must be paid through the external
//! checkout before `payment_expiry`. The tracker runs one [`ExpiryTimer`] per
//! such booking, warns the member when the window closes and marks the
//! booking as expired locally until the backend says otherwise.

use super::timer::{Countdown, ExpiryTimer};
use crate::clock::Clock;
use crate::notify::{Notification, Notifier};
use chrono_tz::Tz;
use shared::models::{Booking, BookingStatus};
use shared::time::format_local_datetime;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Local view of a tracked payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    AwaitingPayment,
    /// Deadline passed locally; the backend has not confirmed the expiry yet
    LocallyExpired,
}

struct Tracked {
    booking: Booking,
    timer: ExpiryTimer,
    arm: u64,
    state: PaymentState,
}

#[derive(Default)]
struct Entries {
    next_arm: u64,
    by_id: HashMap<String, Tracked>,
}

pub struct PendingPaymentTracker {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    timezone: Tz,
    entries: Arc<Mutex<Entries>>,
}

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}

impl PendingPaymentTracker {
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>, timezone: Tz) -> Self {
        Self {
            clock,
            notifier,
            timezone,
            entries: Arc::new(Mutex::new(Entries::default())),
        }
    }

    /// Start or refresh the countdown for `booking`
    ///
    /// Bookings that are not awaiting payment are dropped from tracking.
    /// Returns whether the booking is tracked afterwards. Must be called from
    /// within a tokio runtime.
    pub fn track(&self, booking: &Booking) -> bool {
        let Some(deadline) = booking.pending_payment_deadline() else {
            self.untrack(&booking.id);
            return false;
        };

        let mut entries = lock(&self.entries);
        if let Some(existing) = entries.by_id.get_mut(&booking.id)
            && existing.booking.payment_expiry == booking.payment_expiry
        {
            existing.booking = booking.clone();
            return true;
        }

        entries.next_arm += 1;
        let arm = entries.next_arm;
        let mut timer = entries
            .by_id
            .remove(&booking.id)
            .map(|t| t.timer)
            .unwrap_or_else(|| ExpiryTimer::new(Arc::clone(&self.clock)));

        let on_expire = {
            let entries = Arc::clone(&self.entries);
            let notifier = Arc::clone(&self.notifier);
            let id = booking.id.clone();
            let when = format_local_datetime(deadline, self.timezone);
            move || {
                let mut guard = lock(&entries);
                let Some(tracked) = guard.by_id.get_mut(&id) else {
                    return;
                };
                if tracked.arm != arm || tracked.state != PaymentState::AwaitingPayment {
                    return;
                }
                tracked.state = PaymentState::LocallyExpired;
                let name = tracked
                    .booking
                    .facility_name
                    .clone()
                    .unwrap_or_else(|| "your booking".to_string());
                drop(guard);

                tracing::info!(booking_id = %id, "Payment window closed");
                notifier.notify(Notification::warning(
                    "Payment window closed",
                    format!("Payment for {name} was not completed before {when}. The slot may be released."),
                ));
                notifier.bookings_changed();
            }
        };
        timer.arm(deadline, on_expire);

        tracing::debug!(booking_id = %booking.id, %deadline, "Tracking pending payment");
        entries.by_id.insert(
            booking.id.clone(),
            Tracked {
                booking: booking.clone(),
                timer,
                arm,
                state: PaymentState::AwaitingPayment,
            },
        );
        true
    }

    /// Apply the backend's view of the member's bookings
    ///
    /// The server status always wins: a booking it reports as confirmed stays
    /// confirmed even when the local countdown already ran out.
    pub fn reconcile(&self, bookings: &[Booking]) {
        let by_id: HashMap<&str, &Booking> = bookings.iter().map(|b| (b.id.as_str(), b)).collect();

        let stale: Vec<String> = {
            let entries = lock(&self.entries);
            entries
                .by_id
                .keys()
                .filter(|id| {
                    by_id
                        .get(id.as_str())
                        .is_none_or(|b| b.status != BookingStatus::PendingPayment)
                })
                .cloned()
                .collect()
        };
        for id in &stale {
            self.untrack(id);
        }

        for booking in bookings {
            if booking.status == BookingStatus::PendingPayment {
                self.track(booking);
            }
        }
    }

    pub fn untrack(&self, booking_id: &str) {
        if lock(&self.entries).by_id.remove(booking_id).is_some() {
            tracing::debug!(booking_id, "Stopped tracking payment");
        }
    }

    pub fn clear(&self) {
        lock(&self.entries).by_id.clear();
    }

    pub fn state(&self, booking_id: &str) -> Option<PaymentState> {
        lock(&self.entries).by_id.get(booking_id).map(|t| t.state)
    }

    /// Status to display: the backend's, unless the local countdown ran out
    pub fn effective_status(&self, booking: &Booking) -> BookingStatus {
        match (booking.status, self.state(&booking.id)) {
            (BookingStatus::PendingPayment, Some(PaymentState::LocallyExpired)) => BookingStatus::Expired,
            (status, _) => status,
        }
    }

    pub fn countdown(&self, booking_id: &str) -> Option<watch::Receiver<Countdown>> {
        lock(&self.entries).by_id.get(booking_id).map(|t| t.timer.subscribe())
    }

    pub fn tracked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = lock(&self.entries).by_id.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for PendingPaymentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingPaymentTracker")
            .field("tracked", &self.tracked_ids())
            .finish()
    }
}
