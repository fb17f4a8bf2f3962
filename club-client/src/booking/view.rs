//! Observable state of a booking dialog

use crate::notify::NotificationLevel;
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Booking, Facility, Slot, SlotKey, SlotStatus};

/// Hold lifecycle phase
///
/// `Conflict` and `Failed` are transient: the controller publishes them and
/// immediately moves on to `SlotsLoading` / `SlotSelected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldPhase {
    #[default]
    Idle,
    SlotsLoading,
    SlotsReady,
    SlotSelected,
    Submitting,
    Confirmed,
    Conflict,
    Failed,
}

/// Message shown inside the dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub level: NotificationLevel,
    pub message: String,
    /// The member can act on it by retrying
    pub retryable: bool,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn warning(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
            retryable,
        }
    }

    pub fn error(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            retryable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HoldView {
    pub phase: HoldPhase,
    pub facility: Option<Facility>,
    pub date: Option<NaiveDate>,
    /// Latest availability response, ordered by start time
    pub slots: Vec<Slot>,
    #[serde(skip)]
    pub selected: Option<SlotKey>,
    pub banner: Option<Banner>,
    /// Set once the backend accepted the booking
    pub booking: Option<Booking>,
}

impl HoldView {
    pub(crate) fn opened(facility: Facility, date: NaiveDate) -> Self {
        Self {
            phase: HoldPhase::SlotsLoading,
            facility: Some(facility),
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase != HoldPhase::Idle
    }

    pub fn slot(&self, key: SlotKey) -> Option<&Slot> {
        self.slots.iter().find(|s| s.key() == key)
    }

    pub fn selected_slot(&self) -> Option<&Slot> {
        self.selected.and_then(|key| self.slot(key))
    }

    /// Whether the slot control should be enabled
    pub fn can_select(&self, key: SlotKey) -> bool {
        matches!(self.phase, HoldPhase::SlotsReady | HoldPhase::SlotSelected)
            && self.slot(key).is_some_and(Slot::is_available)
    }

    /// Whether the confirm button should be enabled
    pub fn can_confirm(&self) -> bool {
        self.phase == HoldPhase::SlotSelected && self.selected_slot().is_some_and(Slot::is_available)
    }

    /// Availability loaded and the facility has nothing on that date
    pub fn has_no_slots(&self) -> bool {
        matches!(self.phase, HoldPhase::SlotsReady) && self.slots.is_empty() && self.banner.is_none()
    }

    pub(crate) fn mark_booked(&mut self, key: SlotKey) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.key() == key) {
            slot.status = SlotStatus::Booked;
        }
    }
}
