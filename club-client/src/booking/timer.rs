//! Expiry countdown
//!
//! Counts down to an absolute deadline, publishing `MM:SS` once per tick and
//! firing a callback once when the deadline passes. One background task per
//! arm; re-arming or dropping the timer cancels it.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use shared::time::{TICK, format_countdown, remaining_until};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Snapshot of a running countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: Duration,
    /// `MM:SS`, never negative
    pub display: String,
    pub expired: bool,
}

impl Countdown {
    fn running(remaining: Duration) -> Self {
        Self {
            display: format_countdown(remaining),
            remaining,
            expired: false,
        }
    }

    fn finished() -> Self {
        Self {
            remaining: Duration::ZERO,
            display: format_countdown(Duration::ZERO),
            expired: true,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::running(Duration::ZERO)
    }
}

pub struct ExpiryTimer {
    clock: Arc<dyn Clock>,
    tx: watch::Sender<Countdown>,
    token: Option<CancellationToken>,
    /// Bumped on every arm and cancel; a task only publishes for its own arm
    generation: Arc<AtomicU64>,
}

impl ExpiryTimer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (tx, _) = watch::channel(Countdown::default());
        Self {
            clock,
            tx,
            token: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start counting down to `deadline`, replacing any previous arm
    ///
    /// `on_expire` runs once, on the runtime, when the deadline passes. A
    /// deadline already in the past fires on the first evaluation. Must be
    /// called from within a tokio runtime.
    pub fn arm<F>(&mut self, deadline: DateTime<Utc>, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let arm = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let remaining = remaining_until(deadline, self.clock.now());
        let deadline_at = Instant::now() + remaining;
        self.tx.send_replace(Countdown::running(remaining));

        let token = CancellationToken::new();
        self.token = Some(token.clone());
        let tx = self.tx.clone();
        let generation = Arc::clone(&self.generation);

        tracing::debug!(%deadline, remaining = %format_countdown(remaining), "Expiry timer armed");

        tokio::spawn(async move {
            // Publish under the channel lock so a newer arm can never be overwritten
            let publish = |countdown: Countdown| {
                tx.send_if_modified(|current| {
                    if generation.load(Ordering::SeqCst) != arm {
                        return false;
                    }
                    *current = countdown;
                    true
                })
            };
            let mut on_expire = Some(on_expire);
            let mut ticker = tokio::time::interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep_until(deadline_at) => {
                        if publish(Countdown::finished())
                            && let Some(f) = on_expire.take()
                        {
                            f();
                            tracing::debug!("Expiry timer fired");
                        }
                        break;
                    }
                    _ = ticker.tick() => {
                        let left = deadline_at.saturating_duration_since(Instant::now());
                        if !publish(Countdown::running(left)) {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Stop the countdown without firing
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            token.cancel();
        }
    }

    /// Whether a countdown is running
    pub fn is_armed(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled()) && !self.tx.borrow().expired
    }

    pub fn current(&self) -> Countdown {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Countdown> {
        self.tx.subscribe()
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ExpiryTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiryTimer")
            .field("armed", &self.is_armed())
            .field("countdown", &*self.tx.borrow())
            .finish()
    }
}
