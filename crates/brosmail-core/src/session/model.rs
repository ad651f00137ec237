//! Session model types.

use serde::{Deserialize, Serialize};

/// How long a session stays valid after creation: 12 hours.
pub const SESSION_DURATION_MS: i64 = 12 * 60 * 60 * 1000;

/// Identity data returned by the license server on a valid key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    /// Display name of the key holder.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Expiry date of the license key, as an opaque string.
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
}

/// A persisted authentication session.
///
/// Serialized field names match the blob the web client wrote, so an
/// existing stored session stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity data for display.
    #[serde(rename = "userData")]
    pub user_data: UserData,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
    /// Absolute expiry deadline, epoch milliseconds.
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

impl Session {
    /// Creates a session starting now with the standard duration.
    #[must_use]
    pub const fn new(user_data: UserData, now_millis: i64) -> Self {
        Self {
            user_data,
            timestamp: now_millis,
            expires_at: now_millis + SESSION_DURATION_MS,
        }
    }

    /// Returns true when the deadline has been reached.
    ///
    /// A session with `expires_at <= now` must never be treated as valid.
    #[must_use]
    pub const fn is_expired(&self, now_millis: i64) -> bool {
        now_millis >= self.expires_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> UserData {
        UserData {
            full_name: "Jane".to_string(),
            expiry_date: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn new_session_spans_twelve_hours() {
        let session = Session::new(user(), 1_000);
        assert_eq!(session.timestamp, 1_000);
        assert_eq!(session.expires_at, 1_000 + SESSION_DURATION_MS);
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let session = Session::new(user(), 0);
        assert!(!session.is_expired(SESSION_DURATION_MS - 1));
        assert!(session.is_expired(SESSION_DURATION_MS));
        assert!(session.is_expired(SESSION_DURATION_MS + 1));
    }

    #[test]
    fn serializes_with_web_client_field_names() {
        let session = Session::new(user(), 42);
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("userData").is_some());
        assert!(json.get("expiresAt").is_some());
        assert_eq!(json["userData"]["fullName"], "Jane");
        assert_eq!(json["userData"]["expiryDate"], "2026-01-01");
    }
}
