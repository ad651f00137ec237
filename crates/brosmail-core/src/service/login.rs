//! License-gated login flow.
//!
//! Ties the throttle, the verifier and the session repository together.
//! Lockout is checked before any network call; transport failures are
//! surfaced but never counted.

use std::sync::Arc;

use brosmail_api::LicenseVerdict;
use tracing::debug;

use super::LicenseCheck;
use crate::lockout::LoginThrottle;
use crate::session::{Session, SessionRepository, UserData};
use crate::storage::KvStore;
use crate::time::Clock;

/// Why a submission was denied by the license server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The key has expired.
    Expired,
    /// The key is invalid or deactivated.
    Invalid,
    /// The server reported an unclassified error.
    Unknown,
}

impl DenyReason {
    const fn base_message(self) -> &'static str {
        match self {
            Self::Expired => "The license key has expired.",
            Self::Invalid => "License key is invalid or has been deactivated.",
            Self::Unknown => "Unknown error occurred or timeout.",
        }
    }
}

/// Outcome of a login submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The key verified; a session was created.
    Success(Session),
    /// No key was entered; nothing was sent.
    MissingKey,
    /// A lockout is active; nothing was sent.
    LockedOut {
        /// Whole minutes until the lockout lifts, rounded up.
        minutes: i64,
    },
    /// The server denied the key; counted toward the throttle.
    Denied {
        /// Denial classification.
        reason: DenyReason,
        /// Attempts remaining before lockout.
        attempts_left: u32,
        /// True when this denial imposed the lockout.
        locked_out: bool,
    },
    /// The request timed out; not counted.
    TimedOut,
    /// The request failed at the transport layer; not counted.
    Failed,
}

impl LoginOutcome {
    /// User-facing message for this outcome, if one should be shown.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::MissingKey => Some("Please enter your licence key!".to_string()),
            Self::LockedOut { minutes } => Some(format!(
                "Account locked. Please try again in {minutes} minutes."
            )),
            // The denial that imposes the lockout reports the lockout,
            // not the verdict: there is no further attempt to spend.
            Self::Denied {
                locked_out: true, ..
            } => Some("Too many login attempts. Account locked for 15 minutes.".to_string()),
            Self::Denied {
                reason,
                attempts_left,
                ..
            } => Some(format!(
                "{} ({attempts_left} attempts remaining)",
                reason.base_message()
            )),
            Self::TimedOut => Some("Request timed out. Please try again later.".to_string()),
            Self::Failed => Some("Request failed.".to_string()),
        }
    }
}

/// License-gated authentication with attempt throttling.
#[derive(Debug)]
pub struct LoginFlow<S, C, V> {
    sessions: SessionRepository<S, C>,
    throttle: LoginThrottle<S, C>,
    verifier: V,
}

impl<S: KvStore, C: Clock, V: LicenseCheck> LoginFlow<S, C, V> {
    /// Creates a flow sharing one store and clock across its parts.
    pub fn new(store: Arc<S>, clock: Arc<C>, verifier: V) -> Self {
        Self {
            sessions: SessionRepository::new(Arc::clone(&store), Arc::clone(&clock)),
            throttle: LoginThrottle::new(store, clock),
            verifier,
        }
    }

    /// Restores login state from a stored session, if one is valid.
    ///
    /// No server round-trip: a valid session is sufficient proof.
    #[must_use]
    pub fn restore(&self) -> Option<UserData> {
        self.sessions.read().map(|session| session.user_data)
    }

    /// Returns the session repository, for expiry handling and logout.
    #[must_use]
    pub const fn sessions(&self) -> &SessionRepository<S, C> {
        &self.sessions
    }

    /// Returns the failure count since the last success.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.throttle.attempts()
    }

    /// Returns true while submissions are blocked by a lockout.
    #[must_use]
    pub fn is_locked_out(&self) -> bool {
        self.throttle.is_locked_out()
    }

    /// Submits a license key for verification.
    ///
    /// Lockout and empty input are rejected before any network call.
    pub async fn submit(&mut self, key: &str) -> LoginOutcome {
        if self.throttle.is_locked_out() {
            return LoginOutcome::LockedOut {
                minutes: self.throttle.remaining_minutes(),
            };
        }
        if key.trim().is_empty() {
            return LoginOutcome::MissingKey;
        }

        match self.verifier.verify(key).await {
            LicenseVerdict::Valid {
                full_name,
                expiry_date,
            } => {
                self.throttle.record_success();
                let session = self.sessions.create(UserData {
                    full_name,
                    expiry_date,
                });
                debug!("login succeeded, session until {}", session.expires_at);
                LoginOutcome::Success(session)
            }
            verdict @ (LicenseVerdict::Expired
            | LicenseVerdict::Invalid
            | LicenseVerdict::UnknownError) => {
                let record = self.throttle.record_failure();
                let reason = match verdict {
                    LicenseVerdict::Expired => DenyReason::Expired,
                    LicenseVerdict::Invalid => DenyReason::Invalid,
                    _ => DenyReason::Unknown,
                };
                LoginOutcome::Denied {
                    reason,
                    attempts_left: record.attempts_left,
                    locked_out: record.locked_out,
                }
            }
            LicenseVerdict::TimedOut => LoginOutcome::TimedOut,
            LicenseVerdict::TransportError => LoginOutcome::Failed,
        }
    }

    /// Logs out by clearing the stored session. Does not touch the
    /// throttle.
    pub fn logout(&self) {
        self.sessions.clear();
    }
}
