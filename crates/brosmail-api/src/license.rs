//! License verification against the remote license server.
//!
//! The server reports outcomes through a `{status, code}` pair of magic
//! numbers. They are decoded once, here, into [`LicenseVerdict`]; nothing
//! downstream branches on raw numbers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{ApiClient, LICENSE_TIMEOUT};

/// Display name used when the server omits one on a valid key.
const DEFAULT_FULL_NAME: &str = "User";

/// Expiry string used when the server omits one on a valid key.
const DEFAULT_EXPIRY: &str = "Unknown";

/// Request body for `/verify-license`.
#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    method: &'static str,
    key: &'a str,
}

/// Wire shape of a license server response.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseResponse {
    /// Outcome class for non-success responses.
    #[serde(default)]
    pub status: i64,
    /// Success marker; `1` on a valid key.
    pub code: Option<i64>,
    /// Holder name, present on success.
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    /// Key expiry date, present on success.
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<String>,
    /// Optional human-readable detail. Ignored; local templates are used.
    pub message: Option<String>,
}

/// Outcome of a license verification.
///
/// `Expired`, `Invalid` and `UnknownError` are semantically negative
/// responses and count toward the login throttle. `TimedOut` and
/// `TransportError` are network-layer failures and must not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseVerdict {
    /// The key is valid; the server returned holder identity data.
    Valid {
        /// Display name of the key holder.
        full_name: String,
        /// Expiry date of the key, as an opaque string.
        expiry_date: String,
    },
    /// The key has expired.
    Expired,
    /// The key is invalid or has been deactivated.
    Invalid,
    /// The server reported an unclassified error.
    UnknownError,
    /// The request hit the client-side timeout.
    TimedOut,
    /// The request failed at the transport layer or returned an
    /// unrecognized shape.
    TransportError,
}

impl LicenseVerdict {
    /// Returns true when this verdict counts toward the login throttle.
    #[must_use]
    pub const fn counts_against_attempts(&self) -> bool {
        matches!(self, Self::Expired | Self::Invalid | Self::UnknownError)
    }

    /// Decodes a wire response into a verdict.
    #[must_use]
    pub fn from_response(response: LicenseResponse) -> Self {
        if response.code == Some(1) {
            return Self::Valid {
                full_name: response
                    .full_name
                    .unwrap_or_else(|| DEFAULT_FULL_NAME.to_string()),
                expiry_date: response
                    .expiry_date
                    .unwrap_or_else(|| DEFAULT_EXPIRY.to_string()),
            };
        }
        match response.status {
            2 => Self::Expired,
            3 => Self::Invalid,
            4 => Self::UnknownError,
            5 => Self::TimedOut,
            _ => Self::TransportError,
        }
    }
}

impl ApiClient {
    /// Verifies a license key.
    ///
    /// Never fails: transport errors and timeouts are folded into the
    /// verdict so callers branch on a single closed type.
    pub async fn verify_license(&self, key: &str) -> LicenseVerdict {
        let url = match self.license_endpoint("verify-license") {
            Ok(url) => url,
            Err(e) => {
                warn!("license endpoint invalid: {e}");
                return LicenseVerdict::TransportError;
            }
        };

        let body = VerifyRequest { method: "web", key };
        let response = self
            .http
            .post(url)
            .timeout(LICENSE_TIMEOUT)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                debug!("license verification timed out");
                return LicenseVerdict::TimedOut;
            }
            Err(e) => {
                warn!("license verification failed: {e}");
                return LicenseVerdict::TransportError;
            }
        };

        match response.json::<LicenseResponse>().await {
            Ok(decoded) => LicenseVerdict::from_response(decoded),
            Err(e) => {
                warn!("license response malformed: {e}");
                LicenseVerdict::TransportError
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode(json: &str) -> LicenseVerdict {
        let response: LicenseResponse = serde_json::from_str(json).unwrap();
        LicenseVerdict::from_response(response)
    }

    #[test]
    fn valid_key_with_identity() {
        let verdict = decode(r#"{"status":1,"code":1,"fullName":"Jane","expiryDate":"2026-01-01"}"#);
        assert_eq!(
            verdict,
            LicenseVerdict::Valid {
                full_name: "Jane".to_string(),
                expiry_date: "2026-01-01".to_string(),
            }
        );
        assert!(!verdict.counts_against_attempts());
    }

    #[test]
    fn valid_key_missing_identity_uses_defaults() {
        let verdict = decode(r#"{"code":1}"#);
        assert_eq!(
            verdict,
            LicenseVerdict::Valid {
                full_name: "User".to_string(),
                expiry_date: "Unknown".to_string(),
            }
        );
    }

    #[test]
    fn status_codes_map_to_named_variants() {
        assert_eq!(decode(r#"{"status":2}"#), LicenseVerdict::Expired);
        assert_eq!(decode(r#"{"status":3}"#), LicenseVerdict::Invalid);
        assert_eq!(decode(r#"{"status":4}"#), LicenseVerdict::UnknownError);
        assert_eq!(decode(r#"{"status":5}"#), LicenseVerdict::TimedOut);
    }

    #[test]
    fn unrecognized_status_is_transport_error() {
        assert_eq!(decode(r#"{"status":99}"#), LicenseVerdict::TransportError);
        assert_eq!(decode(r"{}"), LicenseVerdict::TransportError);
    }

    #[test]
    fn only_semantic_denials_count_toward_attempts() {
        assert!(LicenseVerdict::Expired.counts_against_attempts());
        assert!(LicenseVerdict::Invalid.counts_against_attempts());
        assert!(LicenseVerdict::UnknownError.counts_against_attempts());
        assert!(!LicenseVerdict::TimedOut.counts_against_attempts());
        assert!(!LicenseVerdict::TransportError.counts_against_attempts());
    }

    #[test]
    fn code_wins_over_status() {
        // A success code takes precedence even if status carries a value.
        let verdict = decode(r#"{"status":2,"code":1,"fullName":"Jane"}"#);
        assert!(matches!(verdict, LicenseVerdict::Valid { .. }));
    }
}
