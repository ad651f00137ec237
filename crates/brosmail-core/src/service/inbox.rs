//! Inbox state: current target, loaded page, and the auto-refresh loop.
//!
//! All remote failures arrive here as sentinel values (empty fallback
//! pages, `CreateStatus::Error`); this service only turns them into UI
//! state. Only one fetch is logically in flight at a time, enforced by
//! the `loading` flag.

use std::sync::Arc;

use brosmail_api::{CreateStatus, InboxPage, Message};
use tracing::debug;

use super::MailGateway;
use crate::address::{Domain, full_address, random_local_part};
use crate::history::InputHistory;
use crate::poller::{AutoRefresh, TickOutcome};
use crate::storage::KvStore;
use crate::time::Clock;

/// Messages shown per inbox page.
pub const PAGE_SIZE: u32 = 5;

/// Outcome of submitting the current target for load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A fetch is already in flight; nothing was done.
    Busy,
    /// The local-part was empty; nothing was sent.
    EmptyInput,
    /// Creating or checking the address failed.
    CreationFailed {
        /// Server-provided detail, when available.
        detail: Option<String>,
    },
    /// The inbox was loaded.
    Loaded {
        /// True when the address was newly created, false when it
        /// already existed.
        created: bool,
    },
}

impl SubmitOutcome {
    /// User-facing status line for this outcome, if one should be shown.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Busy | Self::EmptyInput => None,
            Self::CreationFailed { detail } => Some(detail.clone().map_or_else(
                || "Error while creating/checking email!".to_string(),
                |detail| format!("Error while creating/checking email! {detail}"),
            )),
            Self::Loaded { created: true } => {
                Some("Email created successfully. Loaded inbox!".to_string())
            }
            Self::Loaded { created: false } => {
                Some("Email already exists. Loaded inbox!".to_string())
            }
        }
    }
}

/// Outcome of a refresh or page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fetch is already in flight; nothing was done.
    Busy,
    /// No mailbox has been loaded yet; the affordance is inert.
    NotLoaded,
    /// The fetch completed and state was applied.
    Done,
    /// The fetch completed but its target no longer matched; the result
    /// was discarded.
    Superseded,
}

/// Informational notices emitted by the auto-refresh loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxNotice {
    /// The loop hit its 60-second ceiling and stopped itself.
    AutoRefreshStopped,
    /// The loop was explicitly disabled.
    AutoRefreshDisabled,
}

impl InboxNotice {
    /// User-facing text for this notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AutoRefreshStopped => "Auto-refresh stopped after 60 seconds.",
            Self::AutoRefreshDisabled => "Auto-refresh disabled.",
        }
    }
}

/// The fetch target at the moment a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FetchTarget {
    local_part: String,
    domain: Domain,
}

/// Client-side inbox state machine over a [`MailGateway`].
#[derive(Debug)]
pub struct InboxService<G, S, C> {
    gateway: G,
    history: InputHistory<S>,
    poller: AutoRefresh<C>,
    local_part: String,
    domain: Domain,
    mails: Vec<Message>,
    page: u32,
    loading: bool,
    loaded_once: bool,
}

impl<G: MailGateway, S: KvStore, C: Clock> InboxService<G, S, C> {
    /// Creates a service over a gateway, shared store and clock.
    pub fn new(gateway: G, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            gateway,
            history: InputHistory::new(store),
            poller: AutoRefresh::new(clock),
            local_part: String::new(),
            domain: Domain::default(),
            mails: Vec::new(),
            page: 1,
            loading: false,
            loaded_once: false,
        }
    }

    /// Current local-part input.
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Current domain selection.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// The full address for the current input.
    #[must_use]
    pub fn address(&self) -> String {
        full_address(&self.local_part, self.domain)
    }

    /// Messages on the loaded page.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.mails
    }

    /// Currently displayed page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of unread messages on the loaded page.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.mails.iter().filter(|mail| !mail.is_read).count()
    }

    /// True while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once a mailbox has been loaded in this session.
    #[must_use]
    pub const fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    /// The auto-refresh loop, read-only.
    #[must_use]
    pub const fn poller(&self) -> &AutoRefresh<C> {
        &self.poller
    }

    /// Previously used local-parts, newest first.
    #[must_use]
    pub fn recent_inputs(&self) -> Vec<String> {
        self.history.entries()
    }

    /// Sets the local-part. Any edit invalidates a running auto-refresh
    /// loop, since its target would be stale.
    pub fn set_local_part(&mut self, value: impl Into<String>) {
        self.local_part = value.into();
        self.poller.disable();
    }

    /// Sets the domain; disables a running auto-refresh loop.
    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
        self.poller.disable();
    }

    /// Replaces the local-part with a random one.
    pub fn generate(&mut self) {
        self.set_local_part(random_local_part());
    }

    fn current_target(&self) -> FetchTarget {
        FetchTarget {
            local_part: self.local_part.clone(),
            domain: self.domain,
        }
    }

    /// Fetches a page for the current target and applies it unless the
    /// target changed while the request was in flight.
    ///
    /// Applying a fallback page clears the displayed list, which is the
    /// specified behavior for a failed fetch (never show another
    /// account's stale data).
    async fn fetch_and_apply(&mut self, page: u32) -> RefreshOutcome {
        let issued_for = self.current_target();
        self.loading = true;
        let result = self
            .gateway
            .fetch_page(&issued_for.local_part, page, PAGE_SIZE)
            .await;
        self.loading = false;
        self.apply_page(&issued_for, result)
    }

    /// Applies a fetched page unless the target it was issued for no
    /// longer matches current state.
    ///
    /// With fetches awaited under `&mut self` the mismatch cannot arise
    /// in-process; the check is kept at this seam so the invariant holds
    /// if operations are ever spawned instead of awaited inline.
    fn apply_page(&mut self, issued_for: &FetchTarget, result: InboxPage) -> RefreshOutcome {
        if self.current_target() != *issued_for {
            debug!("discarding fetch result for superseded target");
            return RefreshOutcome::Superseded;
        }
        self.mails = result.emails;
        self.page = result.page;
        RefreshOutcome::Done
    }

    /// Loads (creating if needed) the mailbox for the current input.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.loading {
            return SubmitOutcome::Busy;
        }
        if self.local_part.trim().is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        self.loading = true;
        // The backend keys the mailbox by local-part; the domain is a
        // display concern and never part of the create payload.
        let status = self.gateway.check_or_create(&self.local_part).await;
        self.loading = false;
        let created = match status {
            CreateStatus::Created => true,
            CreateStatus::Exists => false,
            CreateStatus::Error { detail } => {
                return SubmitOutcome::CreationFailed { detail };
            }
        };

        self.history.record(&self.local_part);
        self.fetch_and_apply(1).await;
        self.loaded_once = true;
        SubmitOutcome::Loaded { created }
    }

    /// Re-fetches the current page.
    ///
    /// Inert until a mailbox has been loaded, and a no-op while another
    /// fetch is in flight.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        if self.loading {
            return RefreshOutcome::Busy;
        }
        if !self.loaded_once {
            return RefreshOutcome::NotLoaded;
        }
        self.fetch_and_apply(self.page).await
    }

    /// Fetches a different page.
    pub async fn change_page(&mut self, page: u32) -> RefreshOutcome {
        if self.loading {
            return RefreshOutcome::Busy;
        }
        if !self.loaded_once {
            return RefreshOutcome::NotLoaded;
        }
        self.fetch_and_apply(page.max(1)).await
    }

    /// Enables the auto-refresh loop. Inert until a mailbox has been
    /// loaded.
    pub fn enable_auto_refresh(&mut self) -> bool {
        if !self.loaded_once {
            return false;
        }
        self.poller.enable();
        true
    }

    /// Disables the auto-refresh loop, returning the notice to show.
    pub fn disable_auto_refresh(&mut self) -> InboxNotice {
        self.poller.disable();
        InboxNotice::AutoRefreshDisabled
    }

    /// Drives the auto-refresh loop by one second.
    ///
    /// Performs the fetch when the countdown elapses. Returns a notice
    /// when the loop stopped itself at the 60-second ceiling.
    pub async fn tick(&mut self) -> Option<InboxNotice> {
        match self.poller.tick() {
            TickOutcome::Expired => Some(InboxNotice::AutoRefreshStopped),
            TickOutcome::StartFetch => {
                if self.loading {
                    // Another fetch is in flight; skip this cycle.
                    self.poller.fetch_complete();
                    return None;
                }
                self.fetch_and_apply(self.page).await;
                match self.poller.fetch_complete() {
                    TickOutcome::Expired => Some(InboxNotice::AutoRefreshStopped),
                    _ => None,
                }
            }
            TickOutcome::Idle | TickOutcome::Counting(_) => None,
        }
    }
}
