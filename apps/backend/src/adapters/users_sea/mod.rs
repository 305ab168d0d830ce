//! SeaORM adapter for user repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        email: Set(dto.email),
        name: Set(dto.name),
        password_hash: Set(dto.password_hash),
        role: Set(dto.role.unwrap_or(users::UserRole::Student)),
        email_confirmed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// Find user by ID or return RecordNotFound error.
///
/// Convenience helper that converts `None` into a DbErr::RecordNotFound,
/// eliminating the repetitive `ok_or_else` pattern when a user must exist.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<users::Model, sea_orm::DbErr> {
    find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("User not found".to_string()))
}

pub async fn mark_email_confirmed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    confirmed_at: time::OffsetDateTime,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = require_user(conn, user_id).await?;
    let mut user_active: users::ActiveModel = user.into();
    user_active.email_confirmed_at = Set(Some(confirmed_at));
    user_active.updated_at = Set(time::OffsetDateTime::now_utc());
    user_active.update(conn).await
}
