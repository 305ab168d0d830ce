//! Domain event publication to the message broker.
//!
//! Services publish envelopes after their transactional work commits; a
//! failed publish is logged by the caller and never changes the HTTP
//! outcome. The transport seam keeps Redis out of service-level tests.

pub mod publisher;
pub mod transport;

use serde::{Deserialize, Serialize};

pub use publisher::EventPublisher;
pub use transport::{EventTransport, MemoryTransport, RedisTransport};

/// Broker channels, one per consumer concern.
pub mod channels {
    pub const COMMENT_COUNT: &str = "classmate.comments.count";
    pub const COMMENT_DELETED: &str = "classmate.comments.deleted";
    pub const FILE_DELETE: &str = "classmate.files.delete";
    pub const NOTIFICATION_COMMENT: &str = "classmate.notifications.comment";
    pub const NOTIFICATION_MILESTONE: &str = "classmate.notifications.milestone";
    pub const FORUM_ID_REQUEST: &str = "classmate.forums.id-request";
}

/// JSON envelope published on broker channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    CommentCountChanged {
        post_id: i64,
        comment_count: i64,
    },
    CommentDeleted {
        comment_id: i64,
        post_id: i64,
        author_id: i64,
    },
    FileDeleteRequested {
        file_id: i64,
        comment_id: i64,
    },
    CommentCreated {
        comment_id: i64,
        post_id: i64,
        author_id: i64,
        preview: String,
    },
    MilestoneReached {
        post_id: i64,
        comment_count: i64,
        milestone: i64,
    },
    ForumIdRequested {
        post_id: i64,
    },
}
