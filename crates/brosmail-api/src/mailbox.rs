//! Mailbox endpoints: create/check an address and fetch inbox pages.
//!
//! These operations deliberately return sentinel values instead of errors:
//! the UI layer branches on outcomes, and a transport failure must degrade
//! to a retryable state, never propagate as an exception.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ApiClient, MAILBOX_TIMEOUT};
use crate::error::Result;
use crate::message::Message;

/// Outcome of a create-or-check call for a mailbox address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStatus {
    /// The mailbox was created.
    Created,
    /// The mailbox already existed.
    Exists,
    /// The call failed; `detail` carries the server's explanation if any.
    Error {
        /// Server-provided detail, when the failure was server-reported.
        detail: Option<String>,
    },
}

impl CreateStatus {
    /// Returns true unless the call failed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }
}

/// One page of inbox messages.
///
/// A fallback page with an empty `emails` vec is returned on any failure;
/// callers treat it as "no data" without distinguishing the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxPage {
    /// Messages on this page.
    pub emails: Vec<Message>,
    /// The page that was requested.
    pub page: u32,
    /// The page size that was requested.
    pub limit: u32,
}

impl InboxPage {
    /// Returns the empty fallback for a failed fetch.
    #[must_use]
    pub const fn fallback(page: u32, limit: u32) -> Self {
        Self {
            emails: Vec::new(),
            page,
            limit,
        }
    }
}

/// Request body for `/create-user`.
#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    email: &'a str,
}

/// Wire shape of a create-or-check response.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    status: String,
    detail: Option<String>,
}

/// Request body for `/create-multiple-emails`.
#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    quantity: u32,
    domain: &'a str,
}

/// Aggregate result of a batch address creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BatchOutcome {
    /// Number of addresses created.
    #[serde(default)]
    pub success: u32,
    /// Number of addresses that failed.
    #[serde(default)]
    pub errors: u32,
    /// Addresses that were created.
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Decodes an inbox response body, falling back on any shape mismatch.
///
/// The backend is supposed to return `{emails: [...]}`; anything else
/// (including `emails` being a non-array) yields the empty fallback.
#[must_use]
pub(crate) fn decode_inbox(value: Value, page: u32, limit: u32) -> InboxPage {
    let Some(emails) = value.get("emails") else {
        return InboxPage::fallback(page, limit);
    };
    if !emails.is_array() {
        warn!("inbox response carried non-array emails field");
        return InboxPage::fallback(page, limit);
    }
    match serde_json::from_value::<Vec<Message>>(emails.clone()) {
        Ok(emails) => InboxPage {
            emails,
            page,
            limit,
        },
        Err(e) => {
            warn!("inbox response messages malformed: {e}");
            InboxPage::fallback(page, limit)
        }
    }
}

impl ApiClient {
    /// Creates the mailbox address if needed, reporting whether it already
    /// existed.
    ///
    /// Transport failures and unrecognized statuses map to
    /// [`CreateStatus::Error`].
    pub async fn check_or_create(&self, email: &str) -> CreateStatus {
        let url = match self.mailbox_endpoint("create-user") {
            Ok(url) => url,
            Err(e) => {
                warn!("create-user endpoint invalid: {e}");
                return CreateStatus::Error { detail: None };
            }
        };

        let response = self
            .http
            .post(url)
            .timeout(MAILBOX_TIMEOUT)
            .json(&CreateRequest { email })
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("create-user request failed: {e}");
                return CreateStatus::Error { detail: None };
            }
        };

        match response.json::<CreateResponse>().await {
            Ok(decoded) => match decoded.status.as_str() {
                "created" => CreateStatus::Created,
                "exists" => CreateStatus::Exists,
                other => {
                    debug!("create-user reported status {other:?}");
                    CreateStatus::Error {
                        detail: decoded.detail,
                    }
                }
            },
            Err(e) => {
                warn!("create-user response malformed: {e}");
                CreateStatus::Error { detail: None }
            }
        }
    }

    /// Fetches one page of the inbox for a local-part.
    ///
    /// Never fails: any transport or shape problem yields the empty
    /// fallback page carrying the requested `page` and `limit`.
    pub async fn fetch_page(&self, user: &str, page: u32, limit: u32) -> InboxPage {
        let url = match self.mailbox_endpoint("emails") {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("user", user)
                    .append_pair("page", &page.to_string())
                    .append_pair("limit", &limit.to_string());
                url
            }
            Err(e) => {
                warn!("emails endpoint invalid: {e}");
                return InboxPage::fallback(page, limit);
            }
        };

        let response = self.http.get(url).timeout(MAILBOX_TIMEOUT).send().await;
        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("inbox fetch failed: {e}");
                return InboxPage::fallback(page, limit);
            }
        };

        match response.json::<Value>().await {
            Ok(value) => decode_inbox(value, page, limit),
            Err(e) => {
                warn!("inbox response unreadable: {e}");
                InboxPage::fallback(page, limit)
            }
        }
    }

    /// Creates a batch of addresses on a domain in one call.
    ///
    /// Unlike the other mailbox operations this returns a typed error on
    /// failure, so the caller can fall back to looping single creates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn create_batch(&self, quantity: u32, domain: &str) -> Result<BatchOutcome> {
        let url = self.mailbox_endpoint("create-multiple-emails")?;
        let response = self
            .http
            .post(url)
            .timeout(MAILBOX_TIMEOUT)
            .json(&BatchRequest { quantity, domain })
            .send()
            .await?;
        Ok(response.json::<BatchOutcome>().await?)
    }
}
