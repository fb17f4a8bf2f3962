//! Booking hold lifecycle
//!
//! [`BookingHoldController`] runs the booking dialog, [`ExpiryTimer`] counts
//! down to absolute deadlines and [`PendingPaymentTracker`] applies it to
//! bookings waiting for external payment.

pub mod error;
pub mod hold;
pub mod payment;
pub mod timer;
pub mod view;

pub use error::{BookingError, SubmitOutcome};
pub use hold::{BookingHoldController, ConfirmOutcome, HoldError};
pub use payment::{PaymentState, PendingPaymentTracker};
pub use timer::{Countdown, ExpiryTimer};
pub use view::{Banner, HoldPhase, HoldView};
