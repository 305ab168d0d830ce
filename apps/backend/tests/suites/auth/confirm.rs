//! Email confirmation flow: GET /api/auth/confirm?token=...

use actix_web::http::StatusCode;
use actix_web::test;
use backend::repos::tokens::{self, ConfirmationTokenCreate};
use backend::repos::users;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use time::OffsetDateTime;

use crate::support::auth_helper::register;
use crate::support::factory::seed_user;
use crate::support::spawn_app;

#[actix_web::test]
async fn test_confirm_marks_email_confirmed() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("confirm");

    let token = register(&app.service, &email, "Alice Lovelace").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/confirm?token={token}"))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "confirmed");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = users::find_by_email(db, &email)
        .await?
        .expect("user should exist");
    assert!(user.is_email_confirmed());

    let record = tokens::find_confirmation_by_token(db, &token)
        .await?
        .expect("token row should exist");
    assert!(record.is_confirmed());

    Ok(())
}

#[actix_web::test]
async fn test_confirm_is_single_use() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("confirm-twice");

    let token = register(&app.service, &email, "Alice Lovelace").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/confirm?token={token}"))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/confirm?token={token}"))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TOKEN_ALREADY_CONFIRMED",
        StatusCode::BAD_REQUEST,
        Some("Email already confirmed"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_confirm_rejects_unknown_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    let req = test::TestRequest::get()
        .uri("/api/auth/confirm?token=no-such-token")
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TOKEN_NOT_FOUND",
        StatusCode::BAD_REQUEST,
        Some("Token not found"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_confirm_rejects_expired_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("confirm-expired");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = seed_user(db, &email).await?;

    let token = uuid::Uuid::new_v4().to_string();
    let expired_at = OffsetDateTime::now_utc() - time::Duration::minutes(5);
    tokens::insert_confirmation(
        db,
        ConfirmationTokenCreate::new(token.clone(), user.id, expired_at),
    )
    .await?;

    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/confirm?token={token}"))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TOKEN_EXPIRED",
        StatusCode::BAD_REQUEST,
        Some("Token expired"),
    )
    .await;

    // An expired redemption must not confirm the account.
    let user = users::find_by_email(db, &email)
        .await?
        .expect("user should exist");
    assert!(!user.is_email_confirmed());

    Ok(())
}
