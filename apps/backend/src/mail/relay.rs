//! HTTP relay mailer.

use async_trait::async_trait;
use serde::Serialize;

use super::Mailer;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts outbound mail as JSON to a relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

impl RelayMailer {
    pub fn new(relay_url: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url: relay_url.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            html: html_body,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|err| AppError::internal(format!("Mail relay request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "Mail relay rejected message with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
