//! Session storage and lazy expiry.

use std::sync::Arc;

use tracing::{debug, warn};

use super::model::{Session, UserData};
use crate::storage::KvStore;
use crate::time::Clock;

/// Storage key for the persisted session blob.
pub const SESSION_KEY: &str = "brosup_session";

/// Creates, validates and invalidates the persisted session.
#[derive(Debug, Clone)]
pub struct SessionRepository<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: KvStore, C: Clock> SessionRepository<S, C> {
    /// Creates a repository over a shared store and clock.
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Writes a fresh session for the given identity, overwriting any
    /// prior value.
    ///
    /// Returns the session so the caller can arm an expiry watcher.
    pub fn create(&self, user_data: UserData) -> Session {
        let session = Session::new(user_data, self.clock.now_millis());
        match serde_json::to_string(&session) {
            Ok(serialized) => self.store.set(SESSION_KEY, &serialized),
            Err(e) => warn!("session serialization failed: {e}"),
        }
        session
    }

    /// Reads the stored session, enforcing expiry lazily.
    ///
    /// Returns `None` when nothing is stored, when the stored blob is
    /// malformed, or when the deadline has passed; in the latter two cases
    /// the entry is deleted first. Malformed state fails open to
    /// logged-out, never to logged-in.
    pub fn read(&self) -> Option<Session> {
        let raw = self.store.get(SESSION_KEY)?;
        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("stored session malformed, discarding: {e}");
                self.store.remove(SESSION_KEY);
                return None;
            }
        };
        if session.is_expired(self.clock.now_millis()) {
            debug!("stored session expired, discarding");
            self.store.remove(SESSION_KEY);
            return None;
        }
        Some(session)
    }

    /// Removes the stored session unconditionally.
    pub fn clear(&self) {
        self.store.remove(SESSION_KEY);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::model::SESSION_DURATION_MS;
    use crate::storage::MemoryStore;
    use crate::time::MockClock;

    fn repo() -> (SessionRepository<MemoryStore, MockClock>, Arc<MemoryStore>, Arc<MockClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(MockClock::new());
        (
            SessionRepository::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            clock,
        )
    }

    fn user() -> UserData {
        UserData {
            full_name: "Jane".to_string(),
            expiry_date: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn create_then_read_round_trips() {
        let (repo, _store, clock) = repo();
        let created = repo.create(user());
        assert_eq!(created.timestamp, clock.now_millis());
        let read = repo.read().unwrap();
        assert_eq!(read, created);
    }

    #[test]
    fn read_after_expiry_deletes_and_returns_none() {
        let (repo, store, clock) = repo();
        repo.create(user());
        clock.advance(std::time::Duration::from_millis(
            u64::try_from(SESSION_DURATION_MS).unwrap() + 1,
        ));
        assert!(repo.read().is_none());
        assert!(store.get(SESSION_KEY).is_none());
        // Idempotent: second read also returns None without error.
        assert!(repo.read().is_none());
    }

    #[test]
    fn expiry_exactly_at_deadline_is_invalid() {
        let (repo, _store, clock) = repo();
        let session = repo.create(user());
        clock.set(session.expires_at);
        assert!(repo.read().is_none());
    }

    #[test]
    fn malformed_blob_fails_open_to_logged_out() {
        let (repo, store, _clock) = repo();
        store.set(SESSION_KEY, "{definitely not json");
        assert!(repo.read().is_none());
        assert!(store.get(SESSION_KEY).is_none());
    }

    #[test]
    fn create_overwrites_prior_session() {
        let (repo, _store, clock) = repo();
        repo.create(user());
        clock.advance(std::time::Duration::from_secs(60));
        let second = repo.create(UserData {
            full_name: "Other".to_string(),
            expiry_date: "2027-01-01".to_string(),
        });
        assert_eq!(repo.read().unwrap(), second);
    }

    #[test]
    fn clear_removes_unconditionally() {
        let (repo, store, _clock) = repo();
        repo.create(user());
        repo.clear();
        assert!(store.get(SESSION_KEY).is_none());
        repo.clear();
    }
}
