//! Login flow: POST /api/auth/authenticate.
//!
//! Covers JWT issuance, credential failures and the single-live-token
//! guarantee a re-login enforces.

use actix_web::http::StatusCode;
use actix_web::test;
use backend::entities::jwt_tokens;
use backend::repos::tokens;
use backend::verify_access_token;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use crate::support::auth_helper::{authenticate, bearer, register, register_and_login, TEST_PASSWORD};
use crate::support::spawn_app;

#[actix_web::test]
async fn test_authenticate_returns_verifiable_jwt() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("login");

    let jwt = register_and_login(&app.service, &email).await;

    let claims = verify_access_token(&jwt, &app.state.security)?;
    assert_eq!(claims.email, email);
    assert_eq!(claims.exp - claims.iat, 15 * 60, "access tokens live 15 minutes");

    // The token is persisted live so later requests can be checked against it.
    let db = app.state.db.as_ref().expect("test app has a database");
    let stored = tokens::find_jwt_by_token(db, &jwt)
        .await?
        .expect("issued JWT should be stored");
    assert_eq!(stored.user_id, claims.user_id()?);
    assert!(stored.is_live());

    Ok(())
}

#[actix_web::test]
async fn test_authenticate_rejects_unknown_email() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/authenticate")
        .set_json(json!({
            "email": unique_email("login-unknown"),
            "password": TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::BAD_REQUEST,
        Some("User not found"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_authenticate_rejects_wrong_password() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("login-wrongpw");

    register(&app.service, &email, "Alice Lovelace").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/authenticate")
        .set_json(json!({
            "email": email,
            "password": "definitely-not-it",
        }))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        Some("Email or password did not match"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_reauthentication_revokes_previous_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("login-twice");

    register(&app.service, &email, "Alice Lovelace").await;
    let first = authenticate(&app.service, &email).await;
    let second = authenticate(&app.service, &email).await;
    assert_ne!(first, second);

    // The first token still verifies cryptographically but is refused because
    // its stored row was marked logged out by the second login.
    let req = bearer(test::TestRequest::get().uri("/api/comments/999"), &first).to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TOKEN_REVOKED",
        StatusCode::UNAUTHORIZED,
        Some("revoked by a later login"),
    )
    .await;

    // The second token passes auth; the 404 proves the request reached the
    // comment handler.
    let req = bearer(test::TestRequest::get().uri("/api/comments/999"), &second).to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Exactly one live row remains for the user.
    let db = app.state.db.as_ref().expect("test app has a database");
    let claims = verify_access_token(&second, &app.state.security)?;
    let live = jwt_tokens::Entity::find()
        .filter(jwt_tokens::Column::UserId.eq(claims.user_id()?))
        .filter(jwt_tokens::Column::LoggedOut.eq(false))
        .count(db)
        .await?;
    assert_eq!(live, 1);

    Ok(())
}
