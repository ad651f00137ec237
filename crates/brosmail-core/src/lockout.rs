//! Login attempt throttling and lockout.
//!
//! Failed verifications are counted in memory; the lockout deadline is
//! persisted so it survives a restart. This is a UX throttle, not a
//! security control: anyone who clears local state resets it.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::KvStore;
use crate::time::Clock;

/// Storage key for the persisted lockout deadline (epoch-millis string).
pub const LOCKOUT_KEY: &str = "login_lockout";

/// Failed verifications allowed before a lockout is imposed.
pub const MAX_ATTEMPTS: u32 = 5;

/// Length of an imposed lockout: 15 minutes.
pub const LOCKOUT_DURATION_MS: i64 = 15 * 60 * 1000;

/// Result of recording a failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureRecord {
    /// Attempts remaining before lockout (0 on the locking failure).
    pub attempts_left: u32,
    /// True when this failure imposed the lockout.
    pub locked_out: bool,
}

/// Tracks failed login attempts and enforces the lockout window.
#[derive(Debug)]
pub struct LoginThrottle<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    attempts: u32,
}

impl<S: KvStore, C: Clock> LoginThrottle<S, C> {
    /// Creates a throttle over a shared store and clock.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            attempts: 0,
        }
    }

    /// Returns the in-memory failure count since the last success.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Records a semantically negative verification result.
    ///
    /// Transport failures must not be recorded. The call that reaches
    /// [`MAX_ATTEMPTS`] persists the lockout deadline and reports
    /// `locked_out = true`.
    pub fn record_failure(&mut self) -> FailureRecord {
        self.attempts += 1;
        let attempts_left = MAX_ATTEMPTS.saturating_sub(self.attempts);
        if self.attempts >= MAX_ATTEMPTS {
            let deadline = self.clock.now_millis() + LOCKOUT_DURATION_MS;
            self.store.set(LOCKOUT_KEY, &deadline.to_string());
            debug!("login locked out until {deadline}");
            FailureRecord {
                attempts_left,
                locked_out: true,
            }
        } else {
            FailureRecord {
                attempts_left,
                locked_out: false,
            }
        }
    }

    /// Resets the failure count after a successful verification.
    ///
    /// An active lockout is left untouched; once imposed it runs its full
    /// duration.
    pub fn record_success(&mut self) {
        self.attempts = 0;
    }

    /// Returns the persisted lockout deadline, clearing it when stale.
    fn deadline(&self) -> Option<i64> {
        let raw = self.store.get(LOCKOUT_KEY)?;
        let deadline: i64 = match raw.parse() {
            Ok(deadline) => deadline,
            Err(e) => {
                warn!("stored lockout deadline unreadable, clearing: {e}");
                self.store.remove(LOCKOUT_KEY);
                return None;
            }
        };
        if self.clock.has_passed(deadline) {
            self.store.remove(LOCKOUT_KEY);
            return None;
        }
        Some(deadline)
    }

    /// Returns true while the lockout window is active.
    #[must_use]
    pub fn is_locked_out(&self) -> bool {
        self.deadline().is_some()
    }

    /// Minutes until the lockout lifts, rounded up. Zero when not locked.
    #[must_use]
    pub fn remaining_minutes(&self) -> i64 {
        self.deadline().map_or(0, |deadline| {
            let remaining = deadline - self.clock.now_millis();
            (remaining + 59_999) / 60_000
        })
    }
}
