//! Wall-clock abstraction for testability.
//!
//! Sessions and lockouts persist absolute epoch-millisecond deadlines, so
//! the clock deals in wall-clock milliseconds rather than monotonic
//! instants. In production use [`SystemClock`]; in tests use [`MockClock`]
//! to control time deterministically.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;

/// Abstraction over wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time as epoch milliseconds.
    fn now_millis(&self) -> i64;

    /// Checks whether a deadline in epoch milliseconds has passed.
    fn has_passed(&self, deadline_millis: i64) -> bool {
        self.now_millis() >= deadline_millis
    }
}

/// System clock backed by `chrono::Utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A mock clock for testing time-dependent code.
///
/// Starts at an arbitrary base and is advanced manually.
#[derive(Debug)]
pub struct MockClock {
    millis: AtomicI64,
}

impl MockClock {
    /// Creates a clock starting at the given epoch milliseconds.
    #[must_use]
    pub const fn starting_at(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Creates a clock starting at a fixed, non-zero base.
    #[must_use]
    pub const fn new() -> Self {
        // Non-zero so that "deadline 0" style bugs surface in tests.
        Self::starting_at(1_700_000_000_000)
    }

    /// Advances the clock by a duration, saturating at `i64::MAX` millis.
    pub fn advance(&self, by: Duration) {
        let millis = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute epoch-millisecond value.
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mock_clock_advances() {
        let clock = MockClock::starting_at(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.now_millis(), 3_000);
    }

    #[test]
    fn has_passed_is_inclusive() {
        let clock = MockClock::starting_at(5_000);
        assert!(clock.has_passed(4_999));
        assert!(clock.has_passed(5_000));
        assert!(!clock.has_passed(5_001));
    }

    #[test]
    fn system_clock_is_roughly_now() {
        let clock = SystemClock;
        let now = Utc::now().timestamp_millis();
        assert!((clock.now_millis() - now).abs() < 1_000);
    }
}
