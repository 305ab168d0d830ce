//! The stable error contract: problem-details bodies, SCREAMING_SNAKE_CASE
//! codes and trace headers, across representative failure paths.

use actix_web::http::StatusCode;
use actix_web::test;
use backend::mint_access_token;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use serde_json::Value;
use std::time::{Duration, SystemTime};

use crate::support::auth_helper::{bearer, register_and_login};
use crate::support::spawn_app;

#[actix_web::test]
async fn test_errors_render_as_problem_details() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("shape")).await;

    let req = bearer(test::TestRequest::get().uri("/api/comments/99999"), &jwt).to_request();
    let resp = test::call_service(&app.service, req).await;

    let content_type = resp
        .headers()
        .get("content-type")
        .expect("error responses carry a content type")
        .to_str()?
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    assert_problem_details_from_service_response(
        resp,
        "COMMENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Comment not found"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_every_response_carries_trace_headers() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    // Success path: both ids present and equal.
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id on success")
        .to_str()?
        .to_string();
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id on success")
        .to_str()?
        .to_string();
    assert_eq!(request_id, trace_id);

    // Error path: the body trace_id matches both headers.
    let req = test::TestRequest::post()
        .uri("/api/comments")
        .set_json(serde_json::json!({"postId": 1, "body": "no auth"}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id on errors")
        .to_str()?
        .to_string();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["trace_id"].as_str(), Some(request_id.as_str()));

    // Ids are minted per request.
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app.service, req).await;
    let second_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id on success")
        .to_str()?
        .to_string();
    assert_ne!(second_id, trace_id);

    Ok(())
}

#[actix_web::test]
async fn test_missing_bearer_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    let req = test::TestRequest::get().uri("/api/comments/1").to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        Some("Missing or malformed Bearer token"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_non_bearer_scheme_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    let req = test::TestRequest::get()
        .uri("/api/comments/1")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        Some("Missing or malformed Bearer token"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_garbage_token_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    let req = bearer(test::TestRequest::get().uri("/api/comments/1"), "not.a.jwt").to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        Some("Invalid JWT"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_expired_token_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    // Minted an hour in the past, so its 15-minute lifetime is long gone.
    let stale = SystemTime::now() - Duration::from_secs(3600);
    let token = mint_access_token(7, "stale@example.test", stale, &app.state.security)?;

    let req = bearer(test::TestRequest::get().uri("/api/comments/1"), &token).to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_EXPIRED_JWT",
        StatusCode::UNAUTHORIZED,
        Some("Token expired"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_malformed_path_segment_is_problem_details() -> Result<(), Box<dyn std::error::Error>>
{
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("shape-path")).await;

    let req = bearer(test::TestRequest::get().uri("/api/comments/abc"), &jwt).to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
        .await;

    Ok(())
}

#[actix_web::test]
async fn test_unmatched_routes_still_get_request_ids() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-request-id"));

    Ok(())
}
