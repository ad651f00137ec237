//! Message model as delivered by the mailbox backend.

use serde::{Deserialize, Serialize};

/// A message in a disposable mailbox.
///
/// Field names mirror the backend's JSON. The body may contain raw markup;
/// consumers must sanitize before rendering it as anything but literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender display name.
    #[serde(default)]
    pub from_name: String,
    /// Sender address.
    #[serde(default)]
    pub from_email: String,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Raw body, possibly containing markup.
    #[serde(default)]
    pub body: String,
    /// Delivery date, as an opaque string.
    #[serde(default)]
    pub date: String,
    /// Whether the message has been read.
    #[serde(default, rename = "isRead")]
    pub is_read: bool,
}

impl Message {
    /// Returns a display string for the sender.
    ///
    /// If a name is present, returns "Name <email>", otherwise just the
    /// address.
    #[must_use]
    pub fn sender_display(&self) -> String {
        if self.from_name.is_empty() {
            self.from_email.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_email)
        }
    }

    /// Returns a truncated plain preview of the body for list rows.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        if self.body.chars().count() > max_chars {
            let cut: String = self.body.chars().take(max_chars).collect();
            format!("{cut}...")
        } else {
            self.body.clone()
        }
    }
}
