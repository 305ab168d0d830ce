//! Calendar event repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::calendar_sea as calendar_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use calendar_adapter::{CalendarEventCreate, CalendarEventUpdate};

/// Calendar event domain model
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: OffsetDateTime,
    pub ends_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

// Free functions (generic) mirroring the previous trait methods

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<CalendarEvent>, DomainError> {
    let event = calendar_adapter::find_by_id(conn, event_id).await?;
    Ok(event.map(CalendarEvent::from))
}

/// Find event by ID or return a domain not-found error.
pub async fn require_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<CalendarEvent, DomainError> {
    find_by_id(conn, event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::CalendarEvent, "Calendar event not found"))
}

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CalendarEventCreate,
) -> Result<CalendarEvent, DomainError> {
    let event = calendar_adapter::create_event(conn, dto).await?;
    Ok(CalendarEvent::from(event))
}

pub async fn list_for_owner_in_range<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> Result<Vec<CalendarEvent>, DomainError> {
    let events = calendar_adapter::list_for_owner_in_range(conn, owner_id, from, to).await?;
    Ok(events.into_iter().map(CalendarEvent::from).collect())
}

pub async fn update_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CalendarEventUpdate,
) -> Result<CalendarEvent, DomainError> {
    let event = calendar_adapter::update_event(conn, dto).await?;
    Ok(CalendarEvent::from(event))
}

pub async fn delete_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<(), DomainError> {
    calendar_adapter::delete_event(conn, event_id).await?;
    Ok(())
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::calendar_events::Model> for CalendarEvent {
    fn from(model: crate::entities::calendar_events::Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            title: model.title,
            description: model.description,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
