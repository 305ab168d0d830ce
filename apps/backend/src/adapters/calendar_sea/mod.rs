//! SeaORM adapter for calendar events repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::calendar_events;

pub mod dto;

pub use dto::{CalendarEventCreate, CalendarEventUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<calendar_events::Model>, sea_orm::DbErr> {
    calendar_events::Entity::find_by_id(event_id).one(conn).await
}

/// Find event by ID or return RecordNotFound error.
pub async fn require_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<calendar_events::Model, sea_orm::DbErr> {
    find_by_id(conn, event_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Calendar event not found".to_string()))
}

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CalendarEventCreate,
) -> Result<calendar_events::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let event_active = calendar_events::ActiveModel {
        id: NotSet,
        owner_id: Set(dto.owner_id),
        title: Set(dto.title),
        description: Set(dto.description),
        starts_at: Set(dto.starts_at),
        ends_at: Set(dto.ends_at),
        created_at: Set(now),
        updated_at: Set(now),
    };

    event_active.insert(conn).await
}

/// List the owner's events overlapping the half-open window `[from, to)`,
/// ordered by start time then id.
pub async fn list_for_owner_in_range<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> Result<Vec<calendar_events::Model>, sea_orm::DbErr> {
    calendar_events::Entity::find()
        .filter(calendar_events::Column::OwnerId.eq(owner_id))
        .filter(calendar_events::Column::StartsAt.lt(to))
        .filter(calendar_events::Column::EndsAt.gt(from))
        .order_by(calendar_events::Column::StartsAt, Order::Asc)
        .order_by(calendar_events::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn update_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CalendarEventUpdate,
) -> Result<calendar_events::Model, sea_orm::DbErr> {
    let event = require_event(conn, dto.id).await?;
    let mut event_active: calendar_events::ActiveModel = event.into();
    if let Some(title) = dto.title {
        event_active.title = Set(title);
    }
    if let Some(description) = dto.description {
        event_active.description = Set(description);
    }
    if let Some(starts_at) = dto.starts_at {
        event_active.starts_at = Set(starts_at);
    }
    if let Some(ends_at) = dto.ends_at {
        event_active.ends_at = Set(ends_at);
    }
    event_active.updated_at = Set(time::OffsetDateTime::now_utc());
    event_active.update(conn).await
}

pub async fn delete_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<(), sea_orm::DbErr> {
    calendar_events::Entity::delete_by_id(event_id)
        .exec(conn)
        .await?;
    Ok(())
}
