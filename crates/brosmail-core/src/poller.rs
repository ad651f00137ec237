//! Auto-refresh countdown state machine.
//!
//! The poller re-fetches the inbox every [`INITIAL_COUNTDOWN`] seconds
//! while enabled, and self-disables once [`MAX_RUN_MS`] has elapsed since
//! it was enabled, regardless of where the countdown stands. It owns no
//! timer of its own: the caller drives it with one [`AutoRefresh::tick`]
//! per second and performs the fetch when told to, which keeps the
//! 60-second ceiling and disable-on-edit rules testable without real
//! timers.

use std::sync::Arc;

use tracing::debug;

use crate::time::Clock;

/// Seconds between automatic refreshes.
pub const INITIAL_COUNTDOWN: u32 = 10;

/// Total time the loop may run after being enabled: 60 seconds.
pub const MAX_RUN_MS: i64 = 60 * 1000;

/// Poller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    /// Not running.
    #[default]
    Disabled,
    /// Counting down to the next fetch.
    Counting(u32),
    /// A fetch is in flight.
    Fetching,
}

/// What the owner should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do (disabled, or a fetch is still in flight).
    Idle,
    /// Countdown decremented; seconds remaining.
    Counting(u32),
    /// Countdown hit zero: perform the fetch, then call
    /// [`AutoRefresh::fetch_complete`].
    StartFetch,
    /// The run ceiling elapsed; the poller disabled itself and the owner
    /// should surface an informational notice.
    Expired,
}

/// Countdown-driven refresh loop with a hard stop condition.
#[derive(Debug)]
pub struct AutoRefresh<C> {
    clock: Arc<C>,
    state: PollerState,
    started_at: Option<i64>,
}

impl<C: Clock> AutoRefresh<C> {
    /// Creates a disabled poller.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            state: PollerState::Disabled,
            started_at: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PollerState {
        self.state
    }

    /// Returns true unless the poller is disabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self.state, PollerState::Disabled)
    }

    /// Seconds remaining on the countdown; zero when not counting.
    #[must_use]
    pub const fn countdown(&self) -> u32 {
        match self.state {
            PollerState::Counting(n) => n,
            PollerState::Disabled | PollerState::Fetching => 0,
        }
    }

    /// Starts the loop. No-op when already running.
    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        self.state = PollerState::Counting(INITIAL_COUNTDOWN);
        self.started_at = Some(self.clock.now_millis());
        debug!("auto-refresh enabled");
    }

    /// Stops the loop from any state and clears the run window.
    pub fn disable(&mut self) {
        self.state = PollerState::Disabled;
        self.started_at = None;
        debug!("auto-refresh disabled");
    }

    /// Returns true once the run ceiling has elapsed.
    fn ceiling_elapsed(&self) -> bool {
        self.started_at
            .is_some_and(|started| self.clock.now_millis() - started >= MAX_RUN_MS)
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            PollerState::Disabled | PollerState::Fetching => TickOutcome::Idle,
            PollerState::Counting(n) => {
                if self.ceiling_elapsed() {
                    self.disable();
                    return TickOutcome::Expired;
                }
                let n = n.saturating_sub(1);
                if n == 0 {
                    self.state = PollerState::Fetching;
                    TickOutcome::StartFetch
                } else {
                    self.state = PollerState::Counting(n);
                    TickOutcome::Counting(n)
                }
            }
        }
    }

    /// Reports the fetch finished; resumes counting unless the loop was
    /// disabled mid-fetch or the ceiling has elapsed.
    pub fn fetch_complete(&mut self) -> TickOutcome {
        if !matches!(self.state, PollerState::Fetching) {
            return TickOutcome::Idle;
        }
        if self.ceiling_elapsed() {
            self.disable();
            return TickOutcome::Expired;
        }
        self.state = PollerState::Counting(INITIAL_COUNTDOWN);
        TickOutcome::Counting(INITIAL_COUNTDOWN)
    }
}
