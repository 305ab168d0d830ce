//! Typed publish surface over the transport.

use std::sync::Arc;

use tracing::debug;

use super::channels;
use super::transport::EventTransport;
use super::DomainEvent;
use crate::error::AppError;

/// Publishes domain events to their channels.
///
/// A publisher without a transport drops every event with a debug log; this
/// is the behavior when no broker is configured.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    transport: Option<Arc<dyn EventTransport>>,
}

impl EventPublisher {
    pub fn with_transport(transport: Arc<dyn EventTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Publisher that drops events (no broker configured).
    pub fn disabled() -> Self {
        Self { transport: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn comment_count_changed(
        &self,
        post_id: i64,
        comment_count: i64,
    ) -> Result<(), AppError> {
        self.publish(
            channels::COMMENT_COUNT,
            &DomainEvent::CommentCountChanged {
                post_id,
                comment_count,
            },
        )
        .await
    }

    pub async fn comment_deleted(
        &self,
        comment_id: i64,
        post_id: i64,
        author_id: i64,
    ) -> Result<(), AppError> {
        self.publish(
            channels::COMMENT_DELETED,
            &DomainEvent::CommentDeleted {
                comment_id,
                post_id,
                author_id,
            },
        )
        .await
    }

    pub async fn file_delete_requested(
        &self,
        file_id: i64,
        comment_id: i64,
    ) -> Result<(), AppError> {
        self.publish(
            channels::FILE_DELETE,
            &DomainEvent::FileDeleteRequested {
                file_id,
                comment_id,
            },
        )
        .await
    }

    pub async fn comment_created(
        &self,
        comment_id: i64,
        post_id: i64,
        author_id: i64,
        preview: String,
    ) -> Result<(), AppError> {
        self.publish(
            channels::NOTIFICATION_COMMENT,
            &DomainEvent::CommentCreated {
                comment_id,
                post_id,
                author_id,
                preview,
            },
        )
        .await
    }

    pub async fn milestone_reached(
        &self,
        post_id: i64,
        comment_count: i64,
        milestone: i64,
    ) -> Result<(), AppError> {
        self.publish(
            channels::NOTIFICATION_MILESTONE,
            &DomainEvent::MilestoneReached {
                post_id,
                comment_count,
                milestone,
            },
        )
        .await
    }

    pub async fn forum_id_requested(&self, post_id: i64) -> Result<(), AppError> {
        self.publish(
            channels::FORUM_ID_REQUEST,
            &DomainEvent::ForumIdRequested { post_id },
        )
        .await
    }

    async fn publish(&self, channel: &str, event: &DomainEvent) -> Result<(), AppError> {
        let Some(transport) = &self.transport else {
            debug!(channel, "event dropped, no broker configured");
            return Ok(());
        };

        let payload = serde_json::to_string(event)
            .map_err(|err| AppError::internal(format!("Failed to serialize event: {err}")))?;

        transport.publish(channel, &payload).await
    }
}
