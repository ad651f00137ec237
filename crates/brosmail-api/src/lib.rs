//! # brosmail-api
//!
//! HTTP boundary for the Brosmail disposable-email client.
//!
//! This crate talks to two remote services:
//! - the mailbox backend (`/create-user`, `/emails`,
//!   `/create-multiple-emails`)
//! - the license server (`/verify-license`)
//!
//! Response shapes are decoded once here; higher layers only ever see
//! closed result types ([`LicenseVerdict`], [`CreateStatus`],
//! [`InboxPage`]) and never raw status numbers or exceptions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod license;
mod mailbox;
mod message;

pub use client::{
    ApiClient, DEFAULT_LICENSE_BASE, DEFAULT_MAILBOX_BASE, LICENSE_TIMEOUT, MAILBOX_TIMEOUT,
};
pub use error::{Error, Result};
pub use license::{LicenseResponse, LicenseVerdict};
pub use mailbox::{BatchOutcome, CreateStatus, InboxPage};
pub use message::Message;
