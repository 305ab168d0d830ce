//! Account lifecycle routes: register, authenticate, confirm email.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::entities::users::UserRole;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::auth;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub status: &'static str,
}

/// POST /api/auth/register
///
/// Creates the account, stores a confirmation token and mails the confirm
/// link. The token is also returned in the body so clients without a mailbox
/// (and tests) can complete the flow.
async fn register(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let state = app_state.clone();
    let registration = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            auth::register(
                txn,
                state.get_ref(),
                &payload.email,
                &payload.name,
                &payload.password,
                payload.role,
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(TokenResponse {
        token: registration.confirmation_token,
    }))
}

/// POST /api/auth/authenticate
///
/// Exchanges email + password for a fresh JWT. Any token issued earlier for
/// the same user is revoked before the new one is stored.
async fn authenticate(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<AuthenticateRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let state = app_state.clone();
    let token = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(
            async move { auth::authenticate(txn, state.get_ref(), &payload.email, &payload.password).await },
        )
    })
    .await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// GET /api/auth/confirm?token=
///
/// Redeems a confirmation token. Single use; expired or already confirmed
/// tokens fail with their own error codes.
async fn confirm(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse, AppError> {
    let token = query.into_inner().token;

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { auth::confirm_email(txn, &token).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ConfirmResponse {
        status: "confirmed",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)));
    cfg.service(web::resource("/authenticate").route(web::post().to(authenticate)));
    cfg.service(web::resource("/confirm").route(web::get().to(confirm)));
}
