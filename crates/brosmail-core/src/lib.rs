//! # brosmail-core
//!
//! Client-side state for the Brosmail disposable-email client.
//!
//! This crate provides:
//! - Key/value storage adapter (in-memory and file-backed)
//! - Time-boxed session management with an expiry watcher
//! - Login attempt throttling with a persisted lockout window
//! - Input history for recently used local-parts
//! - Auto-refresh polling state machine with a hard stop condition
//! - Verification-code extraction from message text
//! - Orchestration services (login flow, inbox service, bulk creation)
//!
//! All remote calls go through `brosmail-api`; failures reach this layer
//! only as sentinel results, never as exceptions crossing into UI state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod address;
pub mod codes;
mod error;
pub mod history;
pub mod lockout;
pub mod poller;
pub mod service;
pub mod session;
pub mod settings;
pub mod storage;
pub mod time;

pub use address::{Domain, full_address, random_local_part};
pub use codes::{extract_codes, strip_markup};
pub use error::{Error, Result};
pub use history::InputHistory;
pub use lockout::{FailureRecord, LOCKOUT_DURATION_MS, LoginThrottle, MAX_ATTEMPTS};
pub use poller::{AutoRefresh, INITIAL_COUNTDOWN, MAX_RUN_MS, PollerState, TickOutcome};
pub use service::{
    BatchReport, InboxNotice, InboxService, LicenseCheck, LoginFlow, LoginOutcome, MailGateway,
    PAGE_SIZE, RefreshOutcome, SubmitOutcome, create_many,
};
pub use session::{
    SESSION_DURATION_MS, Session, SessionEvent, SessionRepository, SessionWatcher, UserData,
};
pub use settings::{ThemeMode, ThemePreference};
pub use storage::{FileStore, KvStore, MemoryStore};
pub use time::{Clock, MockClock, SystemClock};
