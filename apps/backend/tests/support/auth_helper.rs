use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use serde_json::json;

/// Password used by every helper-registered account.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Register an account through the API and return the confirmation token.
pub async fn register<S>(app: &S, email: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": email,
            "name": name,
            "password": TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "register should return 201");

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("register body should carry the confirmation token")
        .to_string()
}

/// Exchange the helper password for a fresh JWT.
pub async fn authenticate<S>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/authenticate")
        .set_json(json!({
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "authenticate should return 200");

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("authenticate body should carry the JWT")
        .to_string()
}

/// Register a fresh account and log it in; returns the JWT.
pub async fn register_and_login<S>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    register(app, email, "Test Student").await;
    authenticate(app, email).await
}

/// Attach a bearer token to a request under construction.
pub fn bearer(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}
