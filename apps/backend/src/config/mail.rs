use std::env;

/// Default prefix for account confirmation links.
const DEFAULT_CONFIRM_BASE_URL: &str = "http://localhost:8080/api/auth/confirm?token=";

/// Outbound email settings.
///
/// When `relay_url` is unset the process falls back to a log-only mailer, so
/// registration keeps working in environments without a relay.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP relay endpoint accepting outbound mail as JSON
    pub relay_url: Option<String>,
    /// From address stamped on every message
    pub from: String,
    /// Prefix the confirmation token is appended to
    pub confirm_base_url: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            relay_url: env::var("CLASSMATE_MAIL_RELAY_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            from: env::var("CLASSMATE_MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@classmate.app".to_string()),
            confirm_base_url: env::var("CLASSMATE_CONFIRM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CONFIRM_BASE_URL.to_string()),
        }
    }

    /// Full confirmation link for a freshly issued token.
    pub fn confirm_link(&self, token: &str) -> String {
        format!("{}{}", self.confirm_base_url, token)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            from: "no-reply@classmate.app".to_string(),
            confirm_base_url: DEFAULT_CONFIRM_BASE_URL.to_string(),
        }
    }
}
