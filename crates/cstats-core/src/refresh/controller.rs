use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use super::types::{ControllerState, RefreshStatus};
use crate::fetch::ListingsSource;
use crate::timestamp::{TimestampStore, format_instant};

/// Decides whether a pull is allowed and coordinates it with the timestamp store.
///
/// The cooldown is anchored on the last *successful* pull. Calls to
/// [`check_and_pull`](Self::check_and_pull) are single-flight: a caller that
/// waits on an in-progress pull sees the freshly saved timestamp and is
/// rate limited instead of pulling again.
pub struct RefreshController<S, F> {
    store: S,
    source: F,
    cooldown: Duration,
    in_flight: Mutex<()>,
    pulling: AtomicBool,
}

/// Clears the pulling flag even if the source panics.
struct PullingGuard<'a>(&'a AtomicBool);

impl<'a> PullingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for PullingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<S: TimestampStore, F: ListingsSource> RefreshController<S, F> {
    pub fn new(store: S, source: F, cooldown: Duration) -> Self {
        Self {
            store,
            source,
            cooldown,
            in_flight: Mutex::new(()),
            pulling: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn check_and_pull(&self) -> RefreshStatus {
        self.check_and_pull_at(Utc::now())
    }

    /// Run one refresh attempt as of `now`.
    pub fn check_and_pull_at(&self, now: DateTime<Utc>) -> RefreshStatus {
        let _flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(last) = self.store.read() {
            if last > now {
                tracing::warn!(
                    event = "core.refresh.timestamp_in_future",
                    last_pull = %format_instant(last),
                    now = %format_instant(now)
                );
            }

            if let Some(remaining) = self.remaining_since(last, now) {
                // `None` only when the instant is past chrono's range
                let next_allowed = now.checked_add_signed(remaining);
                tracing::info!(
                    event = "core.refresh.rate_limited",
                    store = self.store.name(),
                    next_allowed = ?next_allowed.map(format_instant)
                );
                return RefreshStatus::rate_limited(next_allowed);
            }
        }

        tracing::info!(event = "core.refresh.pull_started", store = self.store.name());
        let outcome = {
            let _pulling = PullingGuard::start(&self.pulling);
            self.source.fetch()
        };

        if outcome.is_success() {
            if let Err(e) = self.store.save(now) {
                tracing::warn!(
                    event = "core.refresh.timestamp_save_failed",
                    store = self.store.name(),
                    error = %e
                );
            }
            tracing::info!(event = "core.refresh.pull_completed");
        } else {
            tracing::warn!(
                event = "core.refresh.pull_failed",
                outcome = ?outcome
            );
        }

        RefreshStatus::from(outcome)
    }

    /// Cooldown left at `now` after a pull at `last`, saturating instead of overflowing.
    fn remaining_since(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
        let elapsed = now.signed_duration_since(last);
        let remaining = self
            .cooldown
            .checked_sub(&elapsed)
            .unwrap_or(Duration::MAX);
        (remaining > Duration::zero()).then_some(remaining)
    }

    /// Time left before the next pull is allowed, if any.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let last = self.store.read()?;
        self.remaining_since(last, now)
    }

    pub fn next_allowed_pull(&self) -> Option<DateTime<Utc>> {
        self.next_allowed_pull_at(Utc::now())
    }

    /// Earliest instant a pull is allowed after `now`.
    ///
    /// `None` if a pull is allowed now, or if the cooldown reaches past the
    /// last representable instant.
    pub fn next_allowed_pull_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.cooldown_remaining(now)
            .and_then(|remaining| now.checked_add_signed(remaining))
    }

    pub fn state(&self) -> ControllerState {
        self.state_at(Utc::now())
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> ControllerState {
        if self.pulling.load(Ordering::SeqCst) {
            ControllerState::Pulling
        } else if self.cooldown_remaining(now).is_some() {
            ControllerState::CoolingDown
        } else {
            ControllerState::Idle
        }
    }
}
