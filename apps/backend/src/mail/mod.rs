//! Outbound email behind the `Mailer` seam.
//!
//! Registration sends the confirmation link through whichever mailer the
//! environment provides: an HTTP relay in production, a log-only fallback
//! everywhere else. Delivery failures are the caller's to log; they never
//! fail the originating request.

pub mod confirmation;
pub mod relay;

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use crate::error::AppError;
use crate::logging::pii::Redacted;

pub use relay::RelayMailer;

#[async_trait]
pub trait Mailer: Send + Sync + fmt::Debug {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

/// Fallback mailer that logs instead of sending.
///
/// The body is intentionally not logged; it embeds the confirmation token.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        info!(
            to = %Redacted(to),
            subject,
            "mail relay not configured, logging instead of sending"
        );
        Ok(())
    }
}
