//! Session expiry timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::time::Clock;

/// Events emitted by the session watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session deadline was reached; the caller must clear the
    /// session and fall back to the unauthenticated state.
    Expired,
}

/// Single-shot timer armed at a session's expiry deadline.
///
/// The owning component re-arms when the session changes and drops the
/// watcher on unmount; dropping aborts the task, so a stale timer can
/// never fire against a cleared session.
#[derive(Debug)]
pub struct SessionWatcher {
    handle: JoinHandle<()>,
}

impl SessionWatcher {
    /// Arms a watcher that fires [`SessionEvent::Expired`] once the
    /// deadline passes.
    ///
    /// The sleep is computed against the injected clock so tests can use
    /// a paused tokio runtime with a mock wall clock.
    pub fn arm<C: Clock + 'static>(
        expires_at_millis: i64,
        clock: Arc<C>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let remaining = expires_at_millis.saturating_sub(clock.now_millis()).max(0);
            #[allow(clippy::cast_sign_loss)] // clamped non-negative above
            tokio::time::sleep(Duration::from_millis(remaining as u64)).await;
            debug!("session deadline reached");
            let _ = events.send(SessionEvent::Expired);
        });
        Self { handle }
    }

    /// Cancels the watcher without waiting for it.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
