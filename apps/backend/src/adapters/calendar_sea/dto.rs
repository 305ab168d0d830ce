//! DTOs for calendar_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new calendar event.
#[derive(Debug, Clone)]
pub struct CalendarEventCreate {
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: OffsetDateTime,
    pub ends_at: OffsetDateTime,
}

impl CalendarEventCreate {
    pub fn new(
        owner_id: i64,
        title: impl Into<String>,
        starts_at: OffsetDateTime,
        ends_at: OffsetDateTime,
    ) -> Self {
        Self {
            owner_id,
            title: title.into(),
            description: None,
            starts_at,
            ends_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// DTO for updating calendar event fields.
#[derive(Debug, Clone)]
pub struct CalendarEventUpdate {
    pub id: i64,
    pub title: Option<String>,
    /// Three-state: None = no change, Some(Some(s)) = set, Some(None) = clear.
    pub description: Option<Option<String>>,
    pub starts_at: Option<OffsetDateTime>,
    pub ends_at: Option<OffsetDateTime>,
}

impl CalendarEventUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            description: None,
            starts_at: None,
            ends_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_starts_at(mut self, starts_at: OffsetDateTime) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    pub fn with_ends_at(mut self, ends_at: OffsetDateTime) -> Self {
        self.ends_at = Some(ends_at);
        self
    }
}
