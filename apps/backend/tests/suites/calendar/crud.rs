//! Calendar event CRUD over HTTP, including the owner-only access rule and
//! the three-state description update.

use actix_web::http::StatusCode;
use actix_web::test;
use backend::verify_access_token;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::support::auth_helper::{bearer, register_and_login};
use crate::support::spawn_app;

const STARTS: &str = "2026-09-01T09:00:00Z";
const ENDS: &str = "2026-09-01T10:30:00Z";

fn ts(value: &Value) -> OffsetDateTime {
    let raw = value.as_str().expect("timestamp should be a string");
    OffsetDateTime::parse(raw, &Rfc3339).expect("timestamp should be RFC 3339")
}

async fn create_event<S>(app: &S, jwt: &str, body: Value) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let req = bearer(test::TestRequest::post().uri("/api/calendar/events"), jwt)
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_create_event_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("cal-create")).await;
    let claims = verify_access_token(&jwt, &app.state.security)?;

    let created = create_event(
        &app.service,
        &jwt,
        json!({"title": "Sprint review", "startsAt": STARTS, "endsAt": ENDS}),
    )
    .await;

    assert!(created["id"].as_i64().expect("id should be numeric") > 0);
    assert_eq!(created["ownerId"].as_i64(), Some(claims.user_id()?));
    assert_eq!(created["title"], "Sprint review");
    assert!(created["description"].is_null());
    assert_eq!(ts(&created["startsAt"]), OffsetDateTime::parse(STARTS, &Rfc3339)?);
    assert_eq!(ts(&created["endsAt"]), OffsetDateTime::parse(ENDS, &Rfc3339)?);

    let id = created["id"].as_i64().expect("id should be numeric");
    let req = bearer(test::TestRequest::get().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched, created);

    Ok(())
}

#[actix_web::test]
async fn test_get_unknown_event_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("cal-404")).await;

    let req = bearer(test::TestRequest::get().uri("/api/calendar/events/31337"), &jwt).to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "EVENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Calendar event not found"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_events_are_private_to_their_owner() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let owner = register_and_login(&app.service, &unique_email("cal-owner")).await;
    let other = register_and_login(&app.service, &unique_email("cal-other")).await;

    let created = create_event(
        &app.service,
        &owner,
        json!({"title": "1:1", "startsAt": STARTS, "endsAt": ENDS}),
    )
    .await;
    let id = created["id"].as_i64().expect("id should be numeric");

    for req in [
        bearer(test::TestRequest::get().uri(&format!("/api/calendar/events/{id}")), &other).to_request(),
        bearer(test::TestRequest::put().uri(&format!("/api/calendar/events/{id}")), &other)
            .set_json(json!({"title": "mine now"}))
            .to_request(),
        bearer(test::TestRequest::delete().uri(&format!("/api/calendar/events/{id}")), &other)
            .to_request(),
    ] {
        let resp = test::call_service(&app.service, req).await;
        assert_problem_details_from_service_response(
            resp,
            "NOT_EVENT_OWNER",
            StatusCode::FORBIDDEN,
            Some("Only the owner may access this event"),
        )
        .await;
    }

    Ok(())
}

#[actix_web::test]
async fn test_update_applies_only_named_fields() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("cal-update")).await;

    let created = create_event(
        &app.service,
        &jwt,
        json!({
            "title": "Standup",
            "description": "Room 4",
            "startsAt": STARTS,
            "endsAt": ENDS,
        }),
    )
    .await;
    let id = created["id"].as_i64().expect("id should be numeric");

    // A title-only update leaves the description and window alone.
    let req = bearer(test::TestRequest::put().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .set_json(json!({"title": "Daily standup"}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = bearer(test::TestRequest::get().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app.service, req).await).await;
    assert_eq!(fetched["title"], "Daily standup");
    assert_eq!(fetched["description"], "Room 4");
    assert_eq!(ts(&fetched["startsAt"]), ts(&created["startsAt"]));

    // An explicit null clears the description; absence would have kept it.
    let req = bearer(test::TestRequest::put().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .set_json(json!({"description": null}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = bearer(test::TestRequest::get().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app.service, req).await).await;
    assert!(fetched["description"].is_null());
    assert_eq!(fetched["title"], "Daily standup");

    Ok(())
}

#[actix_web::test]
async fn test_update_rejects_a_window_turned_inside_out() -> Result<(), Box<dyn std::error::Error>>
{
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("cal-badwindow")).await;

    let created = create_event(
        &app.service,
        &jwt,
        json!({"title": "Workshop", "startsAt": STARTS, "endsAt": ENDS}),
    )
    .await;
    let id = created["id"].as_i64().expect("id should be numeric");

    // Moving the end before the unchanged start must fail.
    let req = bearer(test::TestRequest::put().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .set_json(json!({"endsAt": "2026-09-01T08:00:00Z"}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Event must not end before it starts"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_create_rejects_inverted_window_and_blank_title() -> Result<(), Box<dyn std::error::Error>>
{
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("cal-invalid")).await;

    let req = bearer(test::TestRequest::post().uri("/api/calendar/events"), &jwt)
        .set_json(json!({"title": "Backwards", "startsAt": ENDS, "endsAt": STARTS}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Event must not end before it starts"),
    )
    .await;

    let req = bearer(test::TestRequest::post().uri("/api/calendar/events"), &jwt)
        .set_json(json!({"title": "   ", "startsAt": STARTS, "endsAt": ENDS}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION",
        StatusCode::BAD_REQUEST,
        Some("Title must not be empty"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_delete_removes_the_event() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("cal-delete")).await;

    let created = create_event(
        &app.service,
        &jwt,
        json!({"title": "Cancelled anyway", "startsAt": STARTS, "endsAt": ENDS}),
    )
    .await;
    let id = created["id"].as_i64().expect("id should be numeric");

    let req = bearer(test::TestRequest::delete().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = bearer(test::TestRequest::get().uri(&format!("/api/calendar/events/{id}")), &jwt)
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
