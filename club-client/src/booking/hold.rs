//! Booking hold controller
//!
//! Drives one booking dialog: load availability for a facility and date, let
//! the member pick one free slot, check eligibility, submit once, and recover
//! from conflicts by re-querying. The hold itself is client-side only; the
//! backend decides whether the slot is still free.
//!
//! Every mutation publishes a fresh [`HoldView`] on a watch channel. State
//! sits behind one mutex that is never held across an await. A session epoch
//! guards against responses that arrive after the dialog was closed or
//! re-opened. A `confirm` future dropped half way still releases the dialog.

use super::error::{BookingError, SubmitOutcome};
use super::payment::PendingPaymentTracker;
use super::view::{Banner, HoldPhase, HoldView};
use crate::api::ClubApi;
use crate::clock::{Clock, SystemClock};
use crate::notify::{Notification, Notifier};
use crate::{ClientResult, HttpClient};
use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::models::{Booking, BookingCreate, Facility, Slot, SlotKey, UserProfile};
use shared::money::format_amount;
use shared::time::{format_date, format_local_datetime};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Actions refused before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoldError {
    #[error("{0} is not accepting bookings right now")]
    FacilityNotBookable(String),

    #[error("No booking is in progress")]
    NotOpen,

    #[error("Availability is still loading")]
    Loading,

    #[error("{0} is already booked")]
    SlotBooked(String),

    #[error("{0} is not offered on this date")]
    UnknownSlot(String),

    #[error("Select a slot first")]
    NoSlotSelected,

    #[error("A booking request is already being sent")]
    SubmissionInFlight,

    #[error("The selected slot changed, confirm again")]
    SelectionChanged,

    #[error("This booking is already confirmed")]
    AlreadyConfirmed,
}

/// What a confirm attempt ended in
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    Confirmed(Booking),
    /// Slot was taken; availability has been re-queried
    Conflict(SlotKey),
    Failed(BookingError),
    /// The dialog was closed or re-opened before the response arrived
    Discarded,
}

struct Session {
    epoch: u64,
    token: CancellationToken,
    /// Outlives the session so at most one POST is ever outstanding
    submitting: bool,
    profile: Option<UserProfile>,
    view: HoldView,
}

impl Session {
    fn phase_guard(&self) -> Result<(), HoldError> {
        match self.view.phase {
            HoldPhase::Idle => Err(HoldError::NotOpen),
            HoldPhase::SlotsLoading | HoldPhase::Conflict => Err(HoldError::Loading),
            HoldPhase::Submitting => Err(HoldError::SubmissionInFlight),
            HoldPhase::Confirmed => Err(HoldError::AlreadyConfirmed),
            HoldPhase::SlotsReady | HoldPhase::SlotSelected | HoldPhase::Failed => Ok(()),
        }
    }

    /// Start a new epoch, cancelling whatever the previous one was waiting on
    fn restart(&mut self, view: HoldView) -> (u64, CancellationToken) {
        self.token.cancel();
        self.epoch += 1;
        self.token = CancellationToken::new();
        self.view = view;
        (self.epoch, self.token.clone())
    }
}

/// Releases the dialog when a `confirm` future is dropped before it settles
struct SubmitGuard<'a, H> {
    controller: &'a BookingHoldController<H>,
    epoch: u64,
    key: SlotKey,
    armed: bool,
}

impl<H> SubmitGuard<'_, H> {
    fn release(&mut self, session: &mut Session) {
        session.submitting = false;
        self.armed = false;
    }
}

impl<H> Drop for SubmitGuard<'_, H> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon_submission(self.epoch, self.key);
        }
    }
}

pub struct BookingHoldController<H> {
    api: ClubApi<H>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    payments: Option<Arc<PendingPaymentTracker>>,
    session: Mutex<Session>,
    view_tx: watch::Sender<HoldView>,
}

impl<H> BookingHoldController<H> {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, session: &Session) {
        self.view_tx.send_replace(session.view.clone());
    }

    fn set_phase(&self, session: &mut Session, phase: HoldPhase) {
        tracing::debug!(from = ?session.view.phase, to = ?phase, epoch = session.epoch, "Hold transition");
        session.view.phase = phase;
        self.publish(session);
    }

    /// Outcome unknown: drop the selection and point the member at their bookings
    fn settle_unconfirmed(&self, session: &mut Session) {
        let err = BookingError::Unconfirmed;
        session.view.selected = None;
        session.view.banner = Some(Banner::warning(err.to_string(), false));
        self.set_phase(session, HoldPhase::SlotsReady);
    }

    /// `confirm` was dropped before it settled
    fn abandon_submission(&self, epoch: u64, key: SlotKey) {
        let mut session = self.lock();
        session.submitting = false;
        if session.epoch != epoch {
            return;
        }
        match session.view.phase {
            HoldPhase::Submitting => {
                tracing::warn!(slot = %key.label(), "Booking request abandoned before its response");
                self.settle_unconfirmed(&mut session);
                drop(session);
                self.notifier.bookings_changed();
            }
            HoldPhase::Conflict | HoldPhase::SlotsLoading => {
                tracing::debug!(slot = %key.label(), "Conflict recovery abandoned");
                session.view.selected = None;
                session.view.mark_booked(key);
                session.view.banner = Some(Banner::warning(
                    format!("{} was just booked. Could not refresh availability, please retry.", key.label()),
                    true,
                ));
                self.set_phase(&mut session, HoldPhase::SlotsReady);
            }
            _ => {}
        }
    }
}

impl<H: HttpClient> BookingHoldController<H> {
    pub fn new(api: ClubApi<H>, notifier: Arc<dyn Notifier>) -> Self {
        let (view_tx, _) = watch::channel(HoldView::default());
        Self {
            api,
            notifier,
            clock: Arc::new(SystemClock),
            timezone: Tz::UTC,
            payments: None,
            session: Mutex::new(Session {
                epoch: 0,
                token: CancellationToken::new(),
                submitting: false,
                profile: None,
                view: HoldView::default(),
            }),
            view_tx,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Club timezone for eligibility dates and displayed deadlines
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Hand created `PENDING_PAYMENT` bookings to a payment countdown
    pub fn with_payment_tracker(mut self, tracker: Arc<PendingPaymentTracker>) -> Self {
        self.payments = Some(tracker);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<HoldView> {
        self.view_tx.subscribe()
    }

    /// Latest published view
    pub fn view(&self) -> HoldView {
        self.view_tx.borrow().clone()
    }

    /// Open the dialog for `facility` on `date` and load its slots
    ///
    /// Replaces any previous session. The member profile is loaded alongside
    /// availability when it is not known yet.
    pub async fn open(&self, facility: Facility, date: NaiveDate) -> Result<(), HoldError> {
        if !facility.is_bookable() {
            tracing::info!(facility_id = %facility.id, status = ?facility.status, "Facility not bookable");
            return Err(HoldError::FacilityNotBookable(facility.name));
        }

        let facility_id = facility.id.clone();
        let (epoch, token, need_profile) = {
            let mut session = self.lock();
            let (epoch, token) = session.restart(HoldView::opened(facility, date));
            tracing::info!(%facility_id, %date, epoch, "Booking dialog opened");
            self.publish(&session);
            (epoch, token, session.profile.is_none())
        };

        let (slots, profile) = tokio::join!(
            self.fetch_slots(&token, &facility_id, date),
            async {
                if need_profile {
                    Some(self.api.users().me().await)
                } else {
                    None
                }
            }
        );

        let mut session = self.lock();
        match profile {
            Some(Ok(profile)) => session.profile = Some(profile),
            Some(Err(e)) => tracing::warn!(error = %e, "Could not load member profile"),
            None => {}
        }

        let Some(result) = slots else {
            return Ok(());
        };
        if session.epoch != epoch {
            tracing::debug!(epoch, current = session.epoch, "Discarding stale availability");
            return Ok(());
        }

        match result {
            Ok(slots) => {
                session.view.slots = slots;
                session.view.banner = None;
            }
            Err(e) => {
                tracing::warn!(%facility_id, %date, error = %e, "Availability query failed");
                session.view.slots.clear();
                session.view.banner = Some(Banner::error(
                    format!("Could not load availability. {}", BookingError::from_load(&e)),
                    e.is_retryable(),
                ));
            }
        }
        self.set_phase(&mut session, HoldPhase::SlotsReady);
        Ok(())
    }

    /// Re-query availability for the open dialog
    ///
    /// A selection that is no longer free is dropped.
    pub async fn refresh(&self) -> Result<(), HoldError> {
        let (epoch, token, facility_id, date, previous) = {
            let mut session = self.lock();
            match session.view.phase {
                HoldPhase::SlotsLoading => {}
                _ => session.phase_guard()?,
            }
            let (Some(facility), Some(date)) = (&session.view.facility, session.view.date) else {
                return Err(HoldError::NotOpen);
            };
            let facility_id = facility.id.clone();
            let previous = session.view.phase;
            self.set_phase(&mut session, HoldPhase::SlotsLoading);
            (session.epoch, session.token.clone(), facility_id, date, previous)
        };

        let Some(result) = self.fetch_slots(&token, &facility_id, date).await else {
            return Ok(());
        };

        let mut session = self.lock();
        if session.epoch != epoch {
            return Ok(());
        }

        match result {
            Ok(slots) => {
                session.view.slots = slots;
                session.view.banner = None;
                if let Some(key) = session.view.selected
                    && !session.view.slot(key).is_some_and(Slot::is_available)
                {
                    session.view.selected = None;
                    session.view.banner = Some(Banner::warning(
                        format!("{} is no longer available", key.label()),
                        false,
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(%facility_id, %date, error = %e, "Availability refresh failed");
                session.view.banner = Some(Banner::error(
                    format!("Could not refresh availability. {}", BookingError::from_load(&e)),
                    true,
                ));
            }
        }

        let phase = match (previous, session.view.selected) {
            (HoldPhase::SlotSelected | HoldPhase::SlotsLoading, Some(_)) => HoldPhase::SlotSelected,
            _ => HoldPhase::SlotsReady,
        };
        self.set_phase(&mut session, phase);
        Ok(())
    }

    /// Pick a slot; replaces any previous selection, no network call
    pub async fn select(&self, key: SlotKey) -> Result<(), HoldError> {
        let mut session = self.lock();
        session.phase_guard()?;

        let slot = session
            .view
            .slot(key)
            .ok_or_else(|| HoldError::UnknownSlot(key.label()))?;
        if !slot.is_available() {
            return Err(HoldError::SlotBooked(key.label()));
        }

        session.view.selected = Some(key);
        session.view.banner = None;
        self.set_phase(&mut session, HoldPhase::SlotSelected);
        Ok(())
    }

    /// Submit the selected slot
    ///
    /// Client-side refusals come back as `Err`; everything the backend says is
    /// classified into a [`ConfirmOutcome`].
    pub async fn confirm(&self) -> Result<ConfirmOutcome, HoldError> {
        let (epoch, key, profile) = {
            let mut session = self.lock();
            if session.submitting {
                tracing::debug!("Confirm ignored, submission in flight");
                return Err(HoldError::SubmissionInFlight);
            }
            session.phase_guard()?;
            if session.view.phase != HoldPhase::SlotSelected {
                return Err(HoldError::NoSlotSelected);
            }
            let Some(slot) = session.view.selected_slot() else {
                return Err(HoldError::NoSlotSelected);
            };
            if !slot.is_available() {
                return Err(HoldError::SlotBooked(slot.label()));
            }
            let key = slot.key();
            session.submitting = true;
            (session.epoch, key, session.profile.clone())
        };
        let mut guard = SubmitGuard {
            controller: self,
            epoch,
            key,
            armed: true,
        };

        // Eligibility gate; never enters Submitting when it fails
        let profile = match profile {
            Some(profile) => Ok(profile),
            None => self.api.users().me().await,
        };
        let gate = match &profile {
            Ok(p) => p
                .eligibility(self.clock.today(self.timezone))
                .map_err(BookingError::from),
            Err(e) => Err(BookingError::from_load(e)),
        };

        let request = {
            let mut session = self.lock();
            if let Ok(profile) = profile {
                session.profile = Some(profile);
            }
            if session.epoch != epoch {
                guard.release(&mut session);
                return Ok(ConfirmOutcome::Discarded);
            }
            if let Err(err) = gate {
                guard.release(&mut session);
                tracing::info!(error = %err, "Booking blocked before submission");
                session.view.banner = Some(Banner::error(err.to_string(), err.is_retryable()));
                self.publish(&session);
                return Ok(ConfirmOutcome::Failed(err));
            }

            // The member may have picked another slot while the gate ran
            let view = &session.view;
            let request = match (&view.facility, view.date, view.selected_slot()) {
                (Some(facility), Some(date), Some(slot))
                    if view.phase == HoldPhase::SlotSelected
                        && slot.key() == key
                        && slot.is_available() =>
                {
                    Some(BookingCreate {
                        facility_id: facility.id.clone(),
                        date,
                        start_time: slot.start_time,
                        end_time: slot.end_time,
                        guests: None,
                    })
                }
                _ => None,
            };
            let Some(request) = request else {
                guard.release(&mut session);
                tracing::info!(slot = %key.label(), "Selection changed before submission");
                return Err(HoldError::SelectionChanged);
            };
            session.view.banner = None;
            self.set_phase(&mut session, HoldPhase::Submitting);
            request
        };

        // Not tied to the session token: a sent booking request is never aborted
        let outcome = self.api.bookings().create(&request).await;

        let token = {
            let mut session = self.lock();
            session.submitting = false;
            if session.epoch != epoch {
                guard.armed = false;
                drop(session);
                tracing::info!(epoch, "Discarding late booking response");
                if let SubmitOutcome::Created(booking) = &outcome {
                    self.notifier.bookings_changed();
                    self.track_payment(booking);
                }
                return Ok(ConfirmOutcome::Discarded);
            }

            match outcome {
                SubmitOutcome::Created(booking) => {
                    guard.armed = false;
                    let message = self.success_message(&session.view, &booking, key);
                    session.view.booking = Some(booking.clone());
                    session.view.banner = Some(Banner::success(message.clone()));
                    self.set_phase(&mut session, HoldPhase::Confirmed);
                    drop(session);

                    self.notifier.notify(Notification::success("Booking confirmed", message));
                    self.notifier.bookings_changed();
                    self.track_payment(&booking);
                    return Ok(ConfirmOutcome::Confirmed(booking));
                }
                SubmitOutcome::Conflict { message } => {
                    tracing::info!(slot = %key.label(), %message, "Slot taken, re-querying availability");
                    self.set_phase(&mut session, HoldPhase::Conflict);
                    session.view.selected = None;
                    self.set_phase(&mut session, HoldPhase::SlotsLoading);
                    session.token.clone()
                }
                SubmitOutcome::Failed(BookingError::Unconfirmed) => {
                    guard.armed = false;
                    self.set_phase(&mut session, HoldPhase::Failed);
                    self.settle_unconfirmed(&mut session);
                    drop(session);
                    self.notifier.bookings_changed();
                    return Ok(ConfirmOutcome::Failed(BookingError::Unconfirmed));
                }
                SubmitOutcome::Failed(err) => {
                    guard.armed = false;
                    self.set_phase(&mut session, HoldPhase::Failed);
                    session.view.banner = Some(Banner::error(err.to_string(), err.is_retryable()));
                    self.set_phase(&mut session, HoldPhase::SlotSelected);
                    return Ok(ConfirmOutcome::Failed(err));
                }
            }
        };

        self.recover_from_conflict(epoch, &token, &request, key).await;
        guard.armed = false;
        Ok(ConfirmOutcome::Conflict(key))
    }

    async fn recover_from_conflict(
        &self,
        epoch: u64,
        token: &CancellationToken,
        request: &BookingCreate,
        key: SlotKey,
    ) {
        let result = self.fetch_slots(token, &request.facility_id, request.date).await;

        let mut session = self.lock();
        if session.epoch != epoch {
            return;
        }
        let taken = format!("{} on {}", key.label(), format_date(request.date));

        match result {
            Some(Ok(slots)) => {
                session.view.slots = slots;
                session.view.banner = Some(Banner::warning(
                    format!("{taken} was just booked by someone else. Please pick another slot."),
                    false,
                ));
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Availability re-query after conflict failed");
                session.view.mark_booked(key);
                session.view.banner = Some(Banner::warning(
                    format!("{taken} was just booked. Could not refresh availability, please retry."),
                    true,
                ));
            }
            None => return,
        }
        self.set_phase(&mut session, HoldPhase::SlotsReady);
    }

    /// Discard the hold and return to `Idle`; refused while submitting
    pub async fn cancel(&self) -> Result<(), HoldError> {
        let mut session = self.lock();
        if session.view.phase == HoldPhase::Submitting {
            return Err(HoldError::SubmissionInFlight);
        }
        session.restart(HoldView::default());
        tracing::info!("Booking dialog cancelled");
        self.publish(&session);
        Ok(())
    }

    /// Tear the dialog down unconditionally
    ///
    /// An in-flight submission keeps running; its response is ignored.
    pub async fn close(&self) {
        let mut session = self.lock();
        session.restart(HoldView::default());
        tracing::debug!("Booking dialog closed");
        self.publish(&session);
    }

    /// Availability query that gives up when the session is torn down
    async fn fetch_slots(
        &self,
        token: &CancellationToken,
        facility_id: &str,
        date: NaiveDate,
    ) -> Option<ClientResult<Vec<Slot>>> {
        let availability = self.api.availability();
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(facility_id, %date, "Availability query aborted");
                None
            }
            result = availability.slots(facility_id, date) => Some(result),
        }
    }

    fn success_message(&self, view: &HoldView, booking: &Booking, key: SlotKey) -> String {
        let facility = view
            .facility
            .as_ref()
            .map(|f| f.name.as_str())
            .or(booking.facility_name.as_deref())
            .unwrap_or("Facility");
        let date = view.date.map(format_date).unwrap_or_default();
        let mut message = format!(
            "{facility} booked for {} on {date}. Total {}",
            key.label(),
            format_amount(booking.total_price)
        );
        if let Some(deadline) = booking.pending_payment_deadline() {
            message.push_str(&format!(
                ". Complete payment before {}",
                format_local_datetime(deadline, self.timezone)
            ));
        }
        message
    }

    fn track_payment(&self, booking: &Booking) {
        if let Some(tracker) = &self.payments {
            tracker.track(booking);
        }
    }
}

impl<H> Drop for BookingHoldController<H> {
    fn drop(&mut self) {
        let session = match self.session.get_mut() {
            Ok(session) => session,
            Err(poisoned) => poisoned.into_inner(),
        };
        session.token.cancel();
    }
}
