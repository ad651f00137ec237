//! Origin-scoped key/value storage.
//!
//! All persisted client state (session, lockout deadline, input history,
//! theme) goes through the [`KvStore`] trait so business logic never
//! touches an ambient global store. [`MemoryStore`] is the in-memory fake
//! for tests and ephemeral use; [`FileStore`] persists to a JSON file in
//! the platform data directory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A synchronous string-keyed store with no expiry semantics of its own.
///
/// Mutations take `&self`; implementations use interior mutability so a
/// single store can be shared by the session, lockout and history
/// components.
pub trait KvStore: Send + Sync {
    /// Returns the value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets a key to a value, overwriting any prior value.
    fn set(&self, key: &str, value: &str);

    /// Removes a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}
