use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::config::mail::MailConfig;
use crate::error::AppError;
use crate::events::{EventPublisher, RedisTransport};
use crate::infra::db::bootstrap_db;
use crate::mail::{LogMailer, Mailer, RelayMailer};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    publisher: Option<Arc<EventPublisher>>,
    mailer: Option<Arc<dyn Mailer>>,
    mail_config: Option<MailConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            publisher: None,
            mailer: None,
            mail_config: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Inject a publisher (tests pass one backed by the in-memory transport).
    pub fn with_publisher(mut self, publisher: Arc<EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_mail_config(mut self, mail_config: MailConfig) -> Self {
        self.mail_config = Some(mail_config);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let publisher = match self.publisher {
            Some(publisher) => publisher,
            None => Arc::new(publisher_from_env().await?),
        };

        let mail_config = self.mail_config.unwrap_or_else(MailConfig::from_env);
        let mailer: Arc<dyn Mailer> = match self.mailer {
            Some(mailer) => mailer,
            None => match &mail_config.relay_url {
                Some(relay_url) => Arc::new(RelayMailer::new(relay_url, &mail_config.from)),
                None => Arc::new(LogMailer),
            },
        };

        if let Some(profile) = self.db_profile {
            // single entrypoint: build + migrate
            let conn = bootstrap_db(profile).await?;
            Ok(AppState::new(
                conn,
                self.security_config,
                publisher,
                mailer,
                mail_config,
            ))
        } else {
            let mut state = AppState::new_without_db(self.security_config);
            state.publisher = publisher;
            state.mailer = mailer;
            state.mail = mail_config;
            Ok(state)
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

/// Broker-backed publisher when CLASSMATE_REDIS_URL is set, disabled otherwise.
async fn publisher_from_env() -> Result<EventPublisher, AppError> {
    match std::env::var("CLASSMATE_REDIS_URL") {
        Ok(url) if !url.is_empty() => {
            let transport = RedisTransport::connect(&url).await?;
            Ok(EventPublisher::with_transport(Arc::new(transport)))
        }
        _ => Ok(EventPublisher::disabled()),
    }
}
