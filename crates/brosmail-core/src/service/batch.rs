//! Bulk address creation with a single-call fast path.
//!
//! The backend offers `/create-multiple-emails`; when that call fails
//! outright, we fall back to looping single create calls with a small
//! delay between them, accumulating per-address outcome lines.

use std::time::Duration;

use brosmail_api::CreateStatus;
use tracing::{debug, warn};

use super::MailGateway;
use crate::address::{Domain, full_address, random_local_part};

/// Delay between single create calls on the fallback path.
pub const BATCH_STEP_DELAY: Duration = Duration::from_millis(200);

/// Aggregate result of a bulk creation, from either path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Addresses created (or already present, on the fallback path).
    pub success: u32,
    /// Addresses that failed.
    pub errors: u32,
    /// Per-address outcome lines for display.
    pub lines: Vec<String>,
}

/// Creates `quantity` random addresses on a domain.
///
/// Tries the batch endpoint first; on failure, loops single
/// create-or-check calls with [`BATCH_STEP_DELAY`] between them.
pub async fn create_many<G: MailGateway>(
    gateway: &G,
    quantity: u32,
    domain: Domain,
) -> BatchReport {
    match gateway.create_batch(quantity, domain.name()).await {
        Ok(outcome) => BatchReport {
            success: outcome.success,
            errors: outcome.errors,
            lines: outcome
                .emails
                .into_iter()
                .map(|email| format!("{email}: created"))
                .collect(),
        },
        Err(e) => {
            warn!("batch create failed, falling back to single creates: {e}");
            create_one_by_one(gateway, quantity, domain).await
        }
    }
}

async fn create_one_by_one<G: MailGateway>(
    gateway: &G,
    quantity: u32,
    domain: Domain,
) -> BatchReport {
    let mut report = BatchReport::default();
    for i in 0..quantity {
        if i > 0 {
            tokio::time::sleep(BATCH_STEP_DELAY).await;
        }
        let email = full_address(&random_local_part(), domain);
        match gateway.check_or_create(&email).await {
            CreateStatus::Created => {
                report.success += 1;
                report.lines.push(format!("{email}: created"));
            }
            CreateStatus::Exists => {
                report.success += 1;
                report.lines.push(format!("{email}: exists"));
            }
            CreateStatus::Error { detail } => {
                debug!("single create failed for {email}: {detail:?}");
                report.errors += 1;
                report.lines.push(format!("{email}: error"));
            }
        }
    }
    report
}
