use backend::auth::password::hash_password;
use backend::repos::calendar::{self, CalendarEvent, CalendarEventCreate};
use backend::repos::comments::{self, Comment, CommentCreate};
use backend::repos::users::{self, User, UserCreate};
use backend::AppError;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use super::auth_helper::TEST_PASSWORD;

/// Insert a user directly, bypassing the register endpoint.
///
/// Uses the shared helper password so the account can still log in over HTTP.
pub async fn seed_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    email: &str,
) -> Result<User, AppError> {
    let password_hash = hash_password(TEST_PASSWORD)?;
    let user = users::create_user(conn, UserCreate::new(email, "Seeded User", password_hash)).await?;
    Ok(user)
}

/// Insert a comment directly, bypassing the HTTP layer and event publishing.
pub async fn seed_comment(
    conn: &(impl ConnectionTrait + Send + Sync),
    post_id: i64,
    author_id: i64,
    body: &str,
) -> Result<Comment, AppError> {
    let comment = comments::create_comment(conn, CommentCreate::new(post_id, author_id, body)).await?;
    Ok(comment)
}

/// Insert a calendar event directly for the given owner.
pub async fn seed_event(
    conn: &(impl ConnectionTrait + Send + Sync),
    owner_id: i64,
    title: &str,
    starts_at: OffsetDateTime,
    ends_at: OffsetDateTime,
) -> Result<CalendarEvent, AppError> {
    let event = calendar::create_event(
        conn,
        CalendarEventCreate::new(owner_id, title, starts_at, ends_at),
    )
    .await?;
    Ok(event)
}
