//! Comment repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::comments_sea as comments_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use comments_adapter::{CommentCreate, CommentPage, CommentUpdate};

/// Comment domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

/// Attachment linking a comment to an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentAttachment {
    pub id: i64,
    pub comment_id: i64,
    pub file_id: i64,
}

// Free functions (generic) mirroring the previous trait methods

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<Option<Comment>, DomainError> {
    let comment = comments_adapter::find_by_id(conn, comment_id).await?;
    Ok(comment.map(Comment::from))
}

/// Find comment by ID or return a domain not-found error.
pub async fn require_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<Comment, DomainError> {
    find_by_id(conn, comment_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Comment, "Comment not found"))
}

pub async fn create_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CommentCreate,
) -> Result<Comment, DomainError> {
    let comment = comments_adapter::create_comment(conn, dto).await?;
    Ok(Comment::from(comment))
}

pub async fn list_by_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    page: CommentPage,
) -> Result<Vec<Comment>, DomainError> {
    let comments = comments_adapter::list_by_post(conn, post_id, page).await?;
    Ok(comments.into_iter().map(Comment::from).collect())
}

pub async fn count_by_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<u64, DomainError> {
    let count = comments_adapter::count_by_post(conn, post_id).await?;
    Ok(count)
}

pub async fn update_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CommentUpdate,
) -> Result<Comment, DomainError> {
    let comment = comments_adapter::update_comment(conn, dto).await?;
    Ok(Comment::from(comment))
}

pub async fn delete_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<(), DomainError> {
    comments_adapter::delete_comment(conn, comment_id).await?;
    Ok(())
}

pub async fn list_attachments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<Vec<CommentAttachment>, DomainError> {
    let attachments = comments_adapter::list_attachments(conn, comment_id).await?;
    Ok(attachments
        .into_iter()
        .map(CommentAttachment::from)
        .collect())
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::comments::Model> for Comment {
    fn from(model: crate::entities::comments::Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            author_id: model.author_id,
            body: model.body,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<crate::entities::comment_attachments::Model> for CommentAttachment {
    fn from(model: crate::entities::comment_attachments::Model) -> Self {
        Self {
            id: model.id,
            comment_id: model.comment_id,
            file_id: model.file_id,
        }
    }
}
