//! Time-boxed authentication session.
//!
//! A session is the client-held proof of a successful license check. It
//! carries an absolute expiry deadline; there is no sliding window and no
//! background sweep. Expiry is enforced lazily on read and eagerly by the
//! [`SessionWatcher`] timer.

mod model;
mod repository;
mod watcher;

pub use model::{SESSION_DURATION_MS, Session, UserData};
pub use repository::{SESSION_KEY, SessionRepository};
pub use watcher::{SessionEvent, SessionWatcher};
