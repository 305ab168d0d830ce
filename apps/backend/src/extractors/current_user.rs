use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::Claims;
use crate::db::require_db;
use crate::db::txn::SharedTxn;
use crate::error::AppError;
use crate::logging::security;
use crate::middleware::jwt_extract::BearerToken;
use crate::repos::{tokens, users};
use crate::state::app_state::AppState;

/// The acting user, resolved from the verified JWT in request extensions.
///
/// Resolution re-checks the stored token row: a token marked logged out is
/// rejected even though its signature still verifies, and the user row must
/// still exist.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Claims and the raw token are stored by the JwtExtract middleware
            let claims = req
                .extensions()
                .get::<Claims>()
                .ok_or_else(AppError::unauthorized_missing_bearer)?
                .clone();
            let raw_token = req
                .extensions()
                .get::<BearerToken>()
                .ok_or_else(AppError::unauthorized_missing_bearer)?
                .0
                .clone();

            let user_id = claims.user_id()?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            // Run the two lookups on the shared transaction if one is present
            let (stored, user) = if let Some(shared_txn) = SharedTxn::from_req(&req) {
                let txn = shared_txn.transaction();
                (
                    tokens::find_jwt_by_token(txn, &raw_token).await?,
                    users::find_by_id(txn, user_id).await?,
                )
            } else {
                let db = require_db(app_state)?;
                (
                    tokens::find_jwt_by_token(db, &raw_token).await?,
                    users::find_by_id(db, user_id).await?,
                )
            };

            let stored = stored.ok_or_else(AppError::unauthorized_invalid_jwt)?;
            if stored.logged_out {
                security::revoked_token_used(user_id);
                return Err(AppError::token_revoked());
            }

            let user = user.ok_or_else(AppError::forbidden_user_not_found)?;

            Ok(CurrentUser {
                id: user.id,
                email: claims.email,
            })
        })
    }
}
