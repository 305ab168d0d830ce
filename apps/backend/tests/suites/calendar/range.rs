//! Range listing: GET /api/calendar/events?from=&to=
//!
//! The window is half open, `[from, to)`: an event ending exactly at `from`
//! or starting exactly at `to` stays out.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use serde_json::Value;
use time::macros::datetime;

use crate::support::auth_helper::{authenticate, bearer};
use crate::support::factory::{seed_event, seed_user};
use crate::support::spawn_app;

async fn list_range<S>(app: &S, jwt: &str, from: &str, to: &str) -> Vec<Value>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let uri = format!("/api/calendar/events?from={from}&to={to}");
    let req = bearer(test::TestRequest::get().uri(&uri), jwt).to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_range_returns_overlapping_events_sorted_by_start() -> Result<(), Box<dyn std::error::Error>>
{
    let app = spawn_app().await?;
    let email = unique_email("range-sort");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = seed_user(db, &email).await?;
    // Seeded out of order on purpose.
    seed_event(
        db,
        user.id,
        "late",
        datetime!(2026-09-01 12:00 UTC),
        datetime!(2026-09-01 13:00 UTC),
    )
    .await?;
    seed_event(
        db,
        user.id,
        "early",
        datetime!(2026-09-01 08:00 UTC),
        datetime!(2026-09-01 09:00 UTC),
    )
    .await?;
    seed_event(
        db,
        user.id,
        "middle",
        datetime!(2026-09-01 10:00 UTC),
        datetime!(2026-09-01 11:00 UTC),
    )
    .await?;

    let jwt = authenticate(&app.service, &email).await;
    let items = list_range(
        &app.service,
        &jwt,
        "2026-09-01T07:00:00Z",
        "2026-09-01T14:00:00Z",
    )
    .await;

    let titles: Vec<&str> = items.iter().filter_map(|e| e["title"].as_str()).collect();
    assert_eq!(titles, vec!["early", "middle", "late"]);

    Ok(())
}

#[actix_web::test]
async fn test_range_window_is_half_open() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("range-bounds");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = seed_user(db, &email).await?;
    // Ends exactly at the window start: out.
    seed_event(
        db,
        user.id,
        "ends at from",
        datetime!(2026-09-01 08:30 UTC),
        datetime!(2026-09-01 09:30 UTC),
    )
    .await?;
    // Straddles the window start: in.
    seed_event(
        db,
        user.id,
        "straddles from",
        datetime!(2026-09-01 09:00 UTC),
        datetime!(2026-09-01 10:00 UTC),
    )
    .await?;
    // Fully inside: in.
    seed_event(
        db,
        user.id,
        "inside",
        datetime!(2026-09-01 10:00 UTC),
        datetime!(2026-09-01 11:00 UTC),
    )
    .await?;
    // Starts exactly at the window end: out.
    seed_event(
        db,
        user.id,
        "starts at to",
        datetime!(2026-09-01 12:00 UTC),
        datetime!(2026-09-01 13:00 UTC),
    )
    .await?;

    let jwt = authenticate(&app.service, &email).await;
    let items = list_range(
        &app.service,
        &jwt,
        "2026-09-01T09:30:00Z",
        "2026-09-01T12:00:00Z",
    )
    .await;

    let titles: Vec<&str> = items.iter().filter_map(|e| e["title"].as_str()).collect();
    assert_eq!(titles, vec!["straddles from", "inside"]);

    Ok(())
}

#[actix_web::test]
async fn test_range_only_sees_the_callers_events() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let mine = unique_email("range-mine");
    let theirs = unique_email("range-theirs");

    let db = app.state.db.as_ref().expect("test app has a database");
    let me = seed_user(db, &mine).await?;
    let them = seed_user(db, &theirs).await?;
    seed_event(
        db,
        me.id,
        "my meeting",
        datetime!(2026-09-02 10:00 UTC),
        datetime!(2026-09-02 11:00 UTC),
    )
    .await?;
    seed_event(
        db,
        them.id,
        "their meeting",
        datetime!(2026-09-02 10:00 UTC),
        datetime!(2026-09-02 11:00 UTC),
    )
    .await?;

    let jwt = authenticate(&app.service, &mine).await;
    let items = list_range(
        &app.service,
        &jwt,
        "2026-09-02T00:00:00Z",
        "2026-09-03T00:00:00Z",
    )
    .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "my meeting");
    assert_eq!(items[0]["ownerId"].as_i64(), Some(me.id));

    Ok(())
}

#[actix_web::test]
async fn test_instant_probe_finds_spanning_events() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("range-instant");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = seed_user(db, &email).await?;
    seed_event(
        db,
        user.id,
        "in progress",
        datetime!(2026-09-03 10:00 UTC),
        datetime!(2026-09-03 11:00 UTC),
    )
    .await?;
    seed_event(
        db,
        user.id,
        "just finished",
        datetime!(2026-09-03 09:00 UTC),
        datetime!(2026-09-03 10:30 UTC),
    )
    .await?;

    // A zero-width window at 10:30 matches only the event still running then.
    let jwt = authenticate(&app.service, &email).await;
    let items = list_range(
        &app.service,
        &jwt,
        "2026-09-03T10:30:00Z",
        "2026-09-03T10:30:00Z",
    )
    .await;

    let titles: Vec<&str> = items.iter().filter_map(|e| e["title"].as_str()).collect();
    assert_eq!(titles, vec!["in progress"]);

    Ok(())
}

#[actix_web::test]
async fn test_missing_bound_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("range-missing");
    let db = app.state.db.as_ref().expect("test app has a database");
    seed_user(db, &email).await?;
    let jwt = authenticate(&app.service, &email).await;

    let req = bearer(
        test::TestRequest::get().uri("/api/calendar/events?from=2026-09-01T00:00:00Z"),
        &jwt,
    )
    .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Query parameter 'to' is required"),
    )
    .await;

    let req = bearer(test::TestRequest::get().uri("/api/calendar/events"), &jwt).to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Query parameter 'from' is required"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_malformed_and_inverted_bounds_are_rejected() -> Result<(), Box<dyn std::error::Error>>
{
    let app = spawn_app().await?;
    let email = unique_email("range-bad");
    let db = app.state.db.as_ref().expect("test app has a database");
    seed_user(db, &email).await?;
    let jwt = authenticate(&app.service, &email).await;

    let req = bearer(
        test::TestRequest::get().uri("/api/calendar/events?from=yesterday&to=2026-09-02T00:00:00Z"),
        &jwt,
    )
    .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Query parameter 'from' must be an RFC 3339 timestamp"),
    )
    .await;

    let req = bearer(
        test::TestRequest::get()
            .uri("/api/calendar/events?from=2026-09-02T00:00:00Z&to=2026-09-01T00:00:00Z"),
        &jwt,
    )
    .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Range end must not precede range start"),
    )
    .await;

    Ok(())
}
