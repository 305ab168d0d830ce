//! Calendar routes: owner-scoped event CRUD and range listing.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::calendar::CalendarEvent;
use crate::services::calendar::{self, EventChanges};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    // Option<Option<String>> distinguishes "not provided" from an explicit
    // null that clears the description.
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<CalendarEvent> for EventResponse {
    fn from(value: CalendarEvent) -> Self {
        Self {
            id: value.id,
            owner_id: value.owner_id,
            title: value.title,
            description: value.description,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// POST /api/calendar/events
async fn create_event(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateEventRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let owner_id = current_user.id;

    let event = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            calendar::create_event(
                txn,
                owner_id,
                &payload.title,
                payload.description,
                payload.starts_at,
                payload.ends_at,
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(EventResponse::from(event)))
}

/// GET /api/calendar/events/{id}
async fn get_event(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();
    let actor_id = current_user.id;

    let event = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { calendar::get_event(txn, actor_id, event_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(EventResponse::from(event)))
}

/// GET /api/calendar/events?from&to
///
/// Lists the caller's events overlapping `[from, to)`, ordered by start.
/// Both bounds are required RFC 3339 timestamps.
async fn list_events(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    let range = query.into_inner();
    let from = required_ts("from", range.from.as_deref())?;
    let to = required_ts("to", range.to.as_deref())?;
    let actor_id = current_user.id;

    let events = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { calendar::list_events(txn, actor_id, from, to).await })
    })
    .await?;

    let events: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(HttpResponse::Ok().json(events))
}

/// PUT /api/calendar/events/{id}
///
/// Partial update; omitted fields are left alone, `description: null`
/// clears the description. Only the owner may update.
async fn update_event(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateEventRequest>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();
    let payload = body.into_inner();
    let actor_id = current_user.id;

    let changes = EventChanges {
        title: payload.title,
        description: payload.description,
        starts_at: payload.starts_at,
        ends_at: payload.ends_at,
    };

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { calendar::update_event(txn, actor_id, event_id, changes).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/calendar/events/{id}
async fn delete_event(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();
    let actor_id = current_user.id;

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { calendar::delete_event(txn, actor_id, event_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

fn required_ts(field: &str, value: Option<&str>) -> Result<OffsetDateTime, AppError> {
    let value = value.ok_or_else(|| {
        AppError::invalid(
            ErrorCode::Validation,
            format!("Query parameter '{field}' is required"),
        )
    })?;
    OffsetDateTime::parse(value, &Rfc3339).map_err(|_| {
        AppError::invalid(
            ErrorCode::Validation,
            format!("Query parameter '{field}' must be an RFC 3339 timestamp"),
        )
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/events")
            .route(web::post().to(create_event))
            .route(web::get().to(list_events)),
    );
    cfg.service(
        web::resource("/events/{id}")
            .route(web::get().to(get_event))
            .route(web::put().to(update_event))
            .route(web::delete().to(delete_event)),
    );
}
