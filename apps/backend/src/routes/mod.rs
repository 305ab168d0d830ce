use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::JwtExtract;

pub mod auth;
pub mod calendar;
pub mod comments;
pub mod health;

/// Configure application routes.
///
/// `main.rs` and the integration test app builder both call this, so the
/// protected scopes carry `JwtExtract` in every context and the auth chain
/// is exercised the same way in tests as in production.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures (malformed path segments, bad query strings) render
    // as problem-details like every other error.
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));

    // Health check: /health
    cfg.route("/health", web::get().to(health::health));

    // Public auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Bearer-protected resources: /api/comments/** and /api/calendar/**
    cfg.service(
        web::scope("/api/comments")
            .wrap(JwtExtract)
            .configure(comments::configure_routes),
    );
    cfg.service(
        web::scope("/api/calendar")
            .wrap(JwtExtract)
            .configure(calendar::configure_routes),
    );
}
