//! SeaORM adapter for comments repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{comment_attachments, comments};

pub mod dto;

pub use dto::{CommentCreate, CommentPage, CommentUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<Option<comments::Model>, sea_orm::DbErr> {
    comments::Entity::find_by_id(comment_id).one(conn).await
}

/// Find comment by ID or return RecordNotFound error.
pub async fn require_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<comments::Model, sea_orm::DbErr> {
    find_by_id(conn, comment_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Comment not found".to_string()))
}

pub async fn create_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CommentCreate,
) -> Result<comments::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let comment_active = comments::ActiveModel {
        id: NotSet,
        post_id: Set(dto.post_id),
        author_id: Set(dto.author_id),
        body: Set(dto.body),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let comment = comment_active.insert(conn).await?;

    for file_id in dto.attachment_file_ids {
        let attachment_active = comment_attachments::ActiveModel {
            id: NotSet,
            comment_id: Set(comment.id),
            file_id: Set(file_id),
        };
        attachment_active.insert(conn).await?;
    }

    Ok(comment)
}

/// List one page of a post's comments in stable feed order: oldest first,
/// ties broken by id.
pub async fn list_by_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    page: CommentPage,
) -> Result<Vec<comments::Model>, sea_orm::DbErr> {
    comments::Entity::find()
        .filter(comments::Column::PostId.eq(post_id))
        .order_by(comments::Column::CreatedAt, Order::Asc)
        .order_by(comments::Column::Id, Order::Asc)
        .offset(page.offset)
        .limit(page.limit)
        .all(conn)
        .await
}

/// Count all comments on a post.
pub async fn count_by_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    comments::Entity::find()
        .filter(comments::Column::PostId.eq(post_id))
        .count(conn)
        .await
}

pub async fn update_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CommentUpdate,
) -> Result<comments::Model, sea_orm::DbErr> {
    let comment = require_comment(conn, dto.id).await?;
    let mut comment_active: comments::ActiveModel = comment.into();
    comment_active.body = Set(dto.body);
    comment_active.updated_at = Set(time::OffsetDateTime::now_utc());
    comment_active.update(conn).await
}

/// Delete a comment; attachment rows go with it via FK cascade.
pub async fn delete_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<(), sea_orm::DbErr> {
    comments::Entity::delete_by_id(comment_id).exec(conn).await?;
    Ok(())
}

pub async fn list_attachments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: i64,
) -> Result<Vec<comment_attachments::Model>, sea_orm::DbErr> {
    comment_attachments::Entity::find()
        .filter(comment_attachments::Column::CommentId.eq(comment_id))
        .order_by(comment_attachments::Column::Id, Order::Asc)
        .all(conn)
        .await
}
