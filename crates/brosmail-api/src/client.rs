//! HTTP client configuration for the remote services.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::Result;

/// Default base URL for the mailbox backend.
pub const DEFAULT_MAILBOX_BASE: &str = "https://stalwart-backend.onrender.com/";

/// Default base URL for the license server.
pub const DEFAULT_LICENSE_BASE: &str = "https://mailpro.brosupdigital.com/";

/// Timeout applied to mailbox endpoint calls.
///
/// The mailbox backend gives no guidance here; 30 seconds keeps a stuck
/// request from pinning the loading state indefinitely.
pub const MAILBOX_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout applied to license verification calls.
pub const LICENSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the mailbox backend and the license server.
///
/// The two services live on different hosts, so each gets its own base URL.
/// A single `reqwest` client is shared; per-request timeouts differ because
/// license verification tolerates a much longer wait than inbox fetches.
#[derive(Debug, Clone)]
pub struct ApiClient {
    mailbox_base: Url,
    license_base: Url,
    pub(crate) http: Client,
}

impl ApiClient {
    /// Creates a client against the default service hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in base URLs fail to parse, which
    /// would indicate a packaging defect rather than a runtime condition.
    pub fn new() -> Result<Self> {
        Self::with_bases(DEFAULT_MAILBOX_BASE, DEFAULT_LICENSE_BASE)
    }

    /// Creates a client against explicit base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if either base URL is not a valid absolute URL.
    pub fn with_bases(mailbox_base: &str, license_base: &str) -> Result<Self> {
        Ok(Self {
            mailbox_base: Url::parse(mailbox_base)?,
            license_base: Url::parse(license_base)?,
            http: Client::new(),
        })
    }

    /// Returns the mailbox backend base URL.
    #[must_use]
    pub const fn mailbox_base(&self) -> &Url {
        &self.mailbox_base
    }

    /// Returns the license server base URL.
    #[must_use]
    pub const fn license_base(&self) -> &Url {
        &self.license_base
    }

    /// Resolves an endpoint path against the mailbox base.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub(crate) fn mailbox_endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.mailbox_base.join(path)?)
    }

    /// Resolves an endpoint path against the license base.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub(crate) fn license_endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.license_base.join(path)?)
    }
}
