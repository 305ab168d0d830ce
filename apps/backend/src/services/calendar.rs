//! Calendar event services: owner-scoped CRUD and range queries.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::errors::domain::{DomainError, OwnershipKind};
use crate::repos::calendar;
use crate::repos::calendar::{CalendarEvent, CalendarEventCreate, CalendarEventUpdate};

/// Longest event title accepted.
pub const MAX_TITLE_LEN: usize = 200;

/// Fields accepted when updating an event; `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    /// Three-state: None = no change, Some(None) = clear, Some(Some(s)) = set.
    pub description: Option<Option<String>>,
    pub starts_at: Option<OffsetDateTime>,
    pub ends_at: Option<OffsetDateTime>,
}

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    title: &str,
    description: Option<String>,
    starts_at: OffsetDateTime,
    ends_at: OffsetDateTime,
) -> Result<CalendarEvent, AppError> {
    let title = validate_title(title)?;
    validate_window(starts_at, ends_at)?;

    let mut dto = CalendarEventCreate::new(owner_id, title, starts_at, ends_at);
    if let Some(description) = description {
        dto = dto.with_description(description);
    }
    let event = calendar::create_event(conn, dto).await?;
    Ok(event)
}

/// Fetch one event; only its owner may see it.
pub async fn get_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    event_id: i64,
) -> Result<CalendarEvent, AppError> {
    let event = calendar::require_event(conn, event_id).await?;
    require_owner(&event, actor_id)?;
    Ok(event)
}

/// List the caller's events overlapping `[from, to)`.
pub async fn list_events<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> Result<Vec<CalendarEvent>, AppError> {
    if to < from {
        return Err(DomainError::validation_other("Range end must not precede range start").into());
    }
    let events = calendar::list_for_owner_in_range(conn, actor_id, from, to).await?;
    Ok(events)
}

/// Apply partial changes to an event. Owner-only; the resulting window must
/// still satisfy `ends_at >= starts_at`.
pub async fn update_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    event_id: i64,
    changes: EventChanges,
) -> Result<CalendarEvent, AppError> {
    let existing = calendar::require_event(conn, event_id).await?;
    require_owner(&existing, actor_id)?;

    let starts_at = changes.starts_at.unwrap_or(existing.starts_at);
    let ends_at = changes.ends_at.unwrap_or(existing.ends_at);
    validate_window(starts_at, ends_at)?;

    let mut dto = CalendarEventUpdate::new(event_id);
    if let Some(title) = changes.title {
        let title = validate_title(&title)?;
        dto = dto.with_title(title);
    }
    if let Some(description) = changes.description {
        dto = dto.with_description(description);
    }
    if let Some(starts_at) = changes.starts_at {
        dto = dto.with_starts_at(starts_at);
    }
    if let Some(ends_at) = changes.ends_at {
        dto = dto.with_ends_at(ends_at);
    }

    let updated = calendar::update_event(conn, dto).await?;
    Ok(updated)
}

pub async fn delete_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    event_id: i64,
) -> Result<(), AppError> {
    let existing = calendar::require_event(conn, event_id).await?;
    require_owner(&existing, actor_id)?;

    calendar::delete_event(conn, event_id).await?;
    Ok(())
}

fn require_owner(event: &CalendarEvent, actor_id: i64) -> Result<(), AppError> {
    if event.owner_id != actor_id {
        return Err(DomainError::ownership(
            OwnershipKind::CalendarEvent,
            "Only the owner may access this event",
        )
        .into());
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<&str, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation_other("Title must not be empty").into());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::validation_other(format!(
            "Title exceeds {MAX_TITLE_LEN} characters"
        ))
        .into());
    }
    Ok(title)
}

fn validate_window(starts_at: OffsetDateTime, ends_at: OffsetDateTime) -> Result<(), AppError> {
    if ends_at < starts_at {
        return Err(DomainError::validation_other("Event must not end before it starts").into());
    }
    Ok(())
}
