//! Orchestration services over the API boundary and persisted state.
//!
//! The remote services are reached through the [`LicenseCheck`] and
//! [`MailGateway`] traits so tests can substitute in-memory fakes for the
//! HTTP client.

mod batch;
mod inbox;
mod login;

use std::future::Future;

use brosmail_api::{ApiClient, BatchOutcome, CreateStatus, InboxPage, LicenseVerdict};

pub use batch::{BATCH_STEP_DELAY, BatchReport, create_many};
pub use inbox::{InboxNotice, InboxService, PAGE_SIZE, RefreshOutcome, SubmitOutcome};
pub use login::{DenyReason, LoginFlow, LoginOutcome};

/// Remote license verification, as the login flow consumes it.
pub trait LicenseCheck: Send + Sync {
    /// Verifies a license key, folding all failures into the verdict.
    fn verify(&self, key: &str) -> impl Future<Output = LicenseVerdict> + Send;
}

impl LicenseCheck for ApiClient {
    async fn verify(&self, key: &str) -> LicenseVerdict {
        self.verify_license(key).await
    }
}

/// Remote mailbox operations, as the inbox service consumes them.
pub trait MailGateway: Send + Sync {
    /// Creates the address if needed, reporting whether it existed.
    fn check_or_create(&self, email: &str) -> impl Future<Output = CreateStatus> + Send;

    /// Fetches one inbox page; failures yield the empty fallback page.
    fn fetch_page(
        &self,
        user: &str,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = InboxPage> + Send;

    /// Creates a batch of addresses in one call.
    fn create_batch(
        &self,
        quantity: u32,
        domain: &str,
    ) -> impl Future<Output = brosmail_api::Result<BatchOutcome>> + Send;
}

impl MailGateway for ApiClient {
    async fn check_or_create(&self, email: &str) -> CreateStatus {
        Self::check_or_create(self, email).await
    }

    async fn fetch_page(&self, user: &str, page: u32, limit: u32) -> InboxPage {
        Self::fetch_page(self, user, page, limit).await
    }

    async fn create_batch(&self, quantity: u32, domain: &str) -> brosmail_api::Result<BatchOutcome> {
        Self::create_batch(self, quantity, domain).await
    }
}
