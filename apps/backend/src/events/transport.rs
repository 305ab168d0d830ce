//! Broker transports behind the `EventTransport` seam.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rand::random;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::warn;

use crate::error::AppError;

// Publish retry configuration (request path)
const PUBLISH_MAX_ATTEMPTS: u32 = 3;
const PUBLISH_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PUBLISH_MAX_RETRY_DELAY_MS: u64 = 200;
const PUBLISH_JITTER_PERCENT: f64 = 0.2;

/// How an encoded event reaches its channel.
#[async_trait]
pub trait EventTransport: Send + Sync + fmt::Debug {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), AppError>;
}

/// Redis pub/sub transport used in production.
pub struct RedisTransport {
    publisher: Mutex<ConnectionManager>,
}

impl fmt::Debug for RedisTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisTransport").finish_non_exhaustive()
    }
}

impl RedisTransport {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid CLASSMATE_REDIS_URL: {err}")))?;

        let manager = ConnectionManager::new(client).await.map_err(|err| {
            AppError::internal(format!(
                "Unable to initialize Redis connection manager: {err}"
            ))
        })?;

        Ok(Self {
            publisher: Mutex::new(manager),
        })
    }
}

#[async_trait]
impl EventTransport for RedisTransport {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), AppError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let publish_res = {
                let mut publisher = self.publisher.lock().await;
                publisher.publish::<_, _, ()>(channel, payload).await
            };

            match publish_res {
                Ok(_) => return Ok(()),
                Err(err) => {
                    let app_err =
                        AppError::internal(format!("Failed to publish event to Redis: {err}"));

                    if attempt >= PUBLISH_MAX_ATTEMPTS || !is_transient_error(&app_err) {
                        return Err(app_err);
                    }

                    let delay = retry_delay(attempt);
                    warn!(
                        error = %app_err,
                        channel,
                        attempt,
                        retry_delay_ms = delay.as_millis() as u64,
                        "Redis publish failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Doubling backoff from 50ms capped at 200ms, with +/-20% jitter.
fn retry_delay(attempt: u32) -> Duration {
    let base_ms = PUBLISH_INITIAL_RETRY_DELAY_MS
        .saturating_mul(2_u64.pow(attempt.saturating_sub(1)))
        .min(PUBLISH_MAX_RETRY_DELAY_MS);

    let jitter_range = base_ms as f64 * PUBLISH_JITTER_PERCENT;
    let jitter = (random::<f64>() * 2.0 - 1.0) * jitter_range;
    let final_ms = (base_ms as f64 + jitter).max(1.0);

    Duration::from_millis(final_ms as u64)
}

fn is_transient_error(err: &AppError) -> bool {
    if let AppError::Config { .. } = err {
        return false;
    }

    let error_msg = err.to_string().to_lowercase();

    if error_msg.contains("authentication failed")
        || error_msg.contains("invalid classmate_redis_url")
        || error_msg.contains("unsupported")
        || error_msg.contains("non-tcp protocol")
    {
        return false;
    }

    if error_msg.contains("connection refused")
        || error_msg.contains("connection reset")
        || error_msg.contains("connection aborted")
        || error_msg.contains("timed out")
        || error_msg.contains("timeout")
        || error_msg.contains("broken pipe")
        || error_msg.contains("network")
        || error_msg.contains("io error")
        || error_msg.contains("stream ended")
    {
        return true;
    }

    if let Some(source) = StdError::source(err) {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
            match io_err.kind() {
                std::io::ErrorKind::ConnectionRefused => return true,
                std::io::ErrorKind::ConnectionAborted => return true,
                std::io::ErrorKind::ConnectionReset => return true,
                std::io::ErrorKind::TimedOut => return true,
                std::io::ErrorKind::WouldBlock => return true,
                std::io::ErrorKind::Interrupted => return true,
                std::io::ErrorKind::PermissionDenied => return false,
                std::io::ErrorKind::Unsupported => return false,
                _ => {}
            }
        }
    }

    true
}

/// In-process transport recording every publish, for tests.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    published: parking_lot::Mutex<Vec<(String, String)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(channel, payload)` pairs in publish order.
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().clone()
    }

    /// Payloads published to one channel, in order.
    pub fn published_on(&self, channel: &str) -> Vec<String> {
        self.published
            .lock()
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.published.lock().clear();
    }
}

#[async_trait]
impl EventTransport for MemoryTransport {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), AppError> {
        self.published
            .lock()
            .push((channel.to_string(), payload.to_string()));
        Ok(())
    }
}
