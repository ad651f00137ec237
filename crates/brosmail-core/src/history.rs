//! Recently used local-parts.

use std::sync::Arc;

use tracing::warn;

use crate::storage::KvStore;

/// Storage key for the persisted history (JSON array of strings).
pub const HISTORY_KEY: &str = "input_history";

/// Maximum number of entries retained.
pub const MAX_ENTRIES: usize = 10;

/// Recency-ordered list of previously used mailbox local-parts.
///
/// Unique, newest first; re-adding an entry moves it to the front. Only
/// non-empty submissions are recorded.
#[derive(Debug)]
pub struct InputHistory<S> {
    store: Arc<S>,
}

impl<S: KvStore> InputHistory<S> {
    /// Creates a history view over a shared store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the stored entries, newest first.
    ///
    /// A malformed stored value is treated as an empty history.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("stored input history malformed: {e}");
                Vec::new()
            }
        }
    }

    /// Records a submitted local-part at the front of the list.
    ///
    /// Empty and whitespace-only input is ignored.
    pub fn record(&self, local_part: &str) {
        let local_part = local_part.trim();
        if local_part.is_empty() {
            return;
        }
        let mut entries = self.entries();
        entries.retain(|entry| entry != local_part);
        entries.insert(0, local_part.to_string());
        entries.truncate(MAX_ENTRIES);
        match serde_json::to_string(&entries) {
            Ok(serialized) => self.store.set(HISTORY_KEY, &serialized),
            Err(e) => warn!("input history serialization failed: {e}"),
        }
    }

    /// Removes all stored entries.
    pub fn clear(&self) {
        self.store.remove(HISTORY_KEY);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    fn history() -> (InputHistory<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (InputHistory::new(Arc::clone(&store)), store)
    }

    #[test]
    fn readd_moves_to_front_without_duplicate() {
        let (history, _store) = history();
        history.record("alice");
        history.record("bob");
        history.record("alice");
        assert_eq!(history.entries(), vec!["alice", "bob"]);
    }

    #[test]
    fn empty_input_is_ignored() {
        let (history, _store) = history();
        history.record("");
        history.record("   ");
        assert!(history.entries().is_empty());
    }

    #[test]
    fn malformed_stored_value_reads_as_empty() {
        let (history, store) = history();
        store.set(HISTORY_KEY, "not json");
        assert!(history.entries().is_empty());
    }

    #[test]
    fn clear_removes_entries() {
        let (history, store) = history();
        history.record("alice");
        history.clear();
        assert!(store.get(HISTORY_KEY).is_none());
        assert!(history.entries().is_empty());
    }

    proptest! {
        #[test]
        fn never_exceeds_cap_and_stays_unique(
            inputs in proptest::collection::vec("[a-z]{1,8}", 0..40)
        ) {
            let (history, _store) = history();
            for input in &inputs {
                history.record(input);
            }
            let entries = history.entries();
            prop_assert!(entries.len() <= MAX_ENTRIES);
            let mut deduped = entries.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), entries.len());
            if let Some(last) = inputs.last() {
                prop_assert_eq!(entries.first(), Some(last));
            }
        }
    }
}
