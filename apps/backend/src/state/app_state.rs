use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::mail::MailConfig;
use crate::events::EventPublisher;
use crate::mail::{LogMailer, Mailer};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Domain event publisher (broker-backed or disabled)
    pub publisher: Arc<EventPublisher>,
    /// Outbound email delivery
    pub mailer: Arc<dyn Mailer>,
    /// Outbound email settings, including the confirmation-link prefix
    pub mail: MailConfig,
}

impl AppState {
    /// Create a new AppState with the given database connection and components
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        publisher: Arc<EventPublisher>,
        mailer: Arc<dyn Mailer>,
        mail: MailConfig,
    ) -> Self {
        Self {
            db: Some(db),
            security,
            publisher,
            mailer,
            mail,
        }
    }

    /// Create a new AppState without a database connection.
    ///
    /// Used by degraded-mode tests and the health endpoint's no-db path;
    /// events and mail fall back to their disabled/log-only forms.
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            publisher: Arc::new(EventPublisher::disabled()),
            mailer: Arc::new(LogMailer),
            mail: MailConfig::default(),
        }
    }
}
