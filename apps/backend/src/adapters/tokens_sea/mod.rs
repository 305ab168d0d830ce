//! SeaORM adapter for JWT and confirmation token storage - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::{confirmation_tokens, jwt_tokens};

pub mod dto;

pub use dto::{ConfirmationTokenCreate, JwtTokenCreate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn insert_jwt<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: JwtTokenCreate,
) -> Result<jwt_tokens::Model, sea_orm::DbErr> {
    let token_active = jwt_tokens::ActiveModel {
        id: NotSet,
        token: Set(dto.token),
        user_id: Set(dto.user_id),
        logged_out: Set(false),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    token_active.insert(conn).await
}

pub async fn find_jwt_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<jwt_tokens::Model>, sea_orm::DbErr> {
    jwt_tokens::Entity::find()
        .filter(jwt_tokens::Column::Token.eq(token))
        .one(conn)
        .await
}

/// Mark every live token for the user as logged out. Returns the number of
/// tokens revoked.
pub async fn revoke_all_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = jwt_tokens::Entity::update_many()
        .col_expr(jwt_tokens::Column::LoggedOut, Expr::value(true))
        .filter(jwt_tokens::Column::UserId.eq(user_id))
        .filter(jwt_tokens::Column::LoggedOut.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

pub async fn insert_confirmation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ConfirmationTokenCreate,
) -> Result<confirmation_tokens::Model, sea_orm::DbErr> {
    let token_active = confirmation_tokens::ActiveModel {
        id: NotSet,
        token: Set(dto.token),
        user_id: Set(dto.user_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
        expires_at: Set(dto.expires_at),
        confirmed_at: Set(None),
    };

    token_active.insert(conn).await
}

pub async fn find_confirmation_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<confirmation_tokens::Model>, sea_orm::DbErr> {
    confirmation_tokens::Entity::find()
        .filter(confirmation_tokens::Column::Token.eq(token))
        .one(conn)
        .await
}

pub async fn mark_confirmed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token_id: i64,
    confirmed_at: time::OffsetDateTime,
) -> Result<confirmation_tokens::Model, sea_orm::DbErr> {
    let token = confirmation_tokens::Entity::find_by_id(token_id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Confirmation token not found".to_string()))?;
    let mut token_active: confirmation_tokens::ActiveModel = token.into();
    token_active.confirmed_at = Set(Some(confirmed_at));
    token_active.update(conn).await
}
