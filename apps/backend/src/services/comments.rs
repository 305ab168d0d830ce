//! Comment services: CRUD plus the domain events each mutation publishes.
//!
//! Event publication happens after the repository work and is best effort; a
//! broker outage is logged and never changes the HTTP outcome.

use sea_orm::ConnectionTrait;
use tracing::warn;

use crate::error::AppError;
use crate::errors::domain::{DomainError, OwnershipKind};
use crate::repos::comments;
use crate::repos::comments::{Comment, CommentCreate, CommentPage, CommentUpdate};
use crate::state::app_state::AppState;

/// Comment totals that trigger a milestone notification.
pub const COMMENT_MILESTONES: [i64; 5] = [10, 50, 100, 500, 1000];

/// Longest comment body accepted.
pub const MAX_BODY_LEN: usize = 2000;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Body preview length carried in comment notifications.
const PREVIEW_LEN: usize = 80;

/// Create a comment for the acting user and publish the resulting events.
pub async fn create_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &AppState,
    author_id: i64,
    post_id: i64,
    body: &str,
    attachment_file_ids: Vec<i64>,
) -> Result<Comment, AppError> {
    let body = validate_body(body)?;

    let comment = comments::create_comment(
        conn,
        CommentCreate::new(post_id, author_id, body).with_attachments(attachment_file_ids),
    )
    .await?;

    let count = comments::count_by_post(conn, post_id).await? as i64;

    publish_or_log(
        state
            .publisher
            .comment_created(comment.id, post_id, author_id, preview(&comment.body))
            .await,
    );
    publish_or_log(state.publisher.comment_count_changed(post_id, count).await);
    if COMMENT_MILESTONES.contains(&count) {
        publish_or_log(state.publisher.milestone_reached(post_id, count, count).await);
        publish_or_log(state.publisher.forum_id_requested(post_id).await);
    }

    Ok(comment)
}

pub async fn get_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<Comment, AppError> {
    let comment = comments::require_comment(conn, comment_id).await?;
    Ok(comment)
}

/// List one page of a post's comments, oldest first.
///
/// `page` defaults to 0 and `size` to 10; `size` is clamped to 1..=100.
pub async fn list_comments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    page: Option<u64>,
    size: Option<u64>,
) -> Result<Vec<Comment>, AppError> {
    let page = page.unwrap_or(0);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = page.saturating_mul(size);

    let items = comments::list_by_post(conn, post_id, CommentPage::new(offset, size)).await?;
    Ok(items)
}

/// Replace a comment's body. Author-only.
pub async fn update_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    comment_id: i64,
    body: &str,
) -> Result<Comment, AppError> {
    let body = validate_body(body)?;

    let existing = comments::require_comment(conn, comment_id).await?;
    if existing.author_id != actor_id {
        return Err(DomainError::ownership(
            OwnershipKind::Comment,
            "Only the author may edit a comment",
        )
        .into());
    }

    let updated = comments::update_comment(conn, CommentUpdate::new(comment_id, body)).await?;
    Ok(updated)
}

/// Delete a comment. Author-only; publishes a file-delete event per
/// attachment, the deletion event, and the decremented count.
pub async fn delete_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &AppState,
    actor_id: i64,
    comment_id: i64,
) -> Result<(), AppError> {
    let existing = comments::require_comment(conn, comment_id).await?;
    if existing.author_id != actor_id {
        return Err(DomainError::ownership(
            OwnershipKind::Comment,
            "Only the author may delete a comment",
        )
        .into());
    }

    let attachments = comments::list_attachments(conn, comment_id).await?;
    comments::delete_comment(conn, comment_id).await?;
    let count = comments::count_by_post(conn, existing.post_id).await? as i64;

    for attachment in attachments {
        publish_or_log(
            state
                .publisher
                .file_delete_requested(attachment.file_id, comment_id)
                .await,
        );
    }
    publish_or_log(
        state
            .publisher
            .comment_deleted(comment_id, existing.post_id, existing.author_id)
            .await,
    );
    publish_or_log(
        state
            .publisher
            .comment_count_changed(existing.post_id, count)
            .await,
    );

    Ok(())
}

fn validate_body(body: &str) -> Result<&str, AppError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DomainError::validation_other("Comment body must not be empty").into());
    }
    if body.chars().count() > MAX_BODY_LEN {
        return Err(DomainError::validation_other(format!(
            "Comment body exceeds {MAX_BODY_LEN} characters"
        ))
        .into());
    }
    Ok(body)
}

fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_LEN).collect()
}

fn publish_or_log(result: Result<(), AppError>) {
    if let Err(err) = result {
        warn!(error = %err, "event publish failed");
    }
}
