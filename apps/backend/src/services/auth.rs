//! Account lifecycle services: registration, login, email confirmation.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::entities::users::UserRole;
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, NotFoundKind, TokenErrorKind, ValidationKind,
};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::mail::confirmation::{build_confirmation_email, CONFIRMATION_SUBJECT};
use crate::repos::tokens::{ConfirmationTokenCreate, JwtTokenCreate};
use crate::repos::users::UserCreate;
use crate::repos::{tokens, users};
use crate::state::app_state::AppState;
use crate::utils::email::is_valid_email;

/// Confirmation links stop working this long after registration.
pub const CONFIRMATION_TOKEN_TTL: time::Duration = time::Duration::minutes(15);

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

const SITE_NAME: &str = "ClassMate";

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub user_id: i64,
    pub confirmation_token: String,
}

/// Register a new account and send the confirmation email.
///
/// The confirmation token is returned so the route can hand it to the client;
/// mail delivery failure is logged, never surfaced.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &AppState,
    email: &str,
    name: &str,
    password: &str,
    role: Option<UserRole>,
) -> Result<Registration, AppError> {
    let name = validate_registration(email, name, password)?;

    if users::find_by_email(conn, email).await?.is_some() {
        return Err(DomainError::conflict(ConflictKind::UniqueEmail, "Email already taken").into());
    }

    let password_hash = hash_password(password)?;
    let mut dto = UserCreate::new(email, name, password_hash);
    if let Some(role) = role {
        dto = dto.with_role(role);
    }
    let user = users::create_user(conn, dto).await?;

    let token = Uuid::new_v4().to_string();
    let expires_at = OffsetDateTime::now_utc() + CONFIRMATION_TOKEN_TTL;
    tokens::insert_confirmation(
        conn,
        ConfirmationTokenCreate::new(token.clone(), user.id, expires_at),
    )
    .await?;

    send_confirmation_email(state, &user.email, &user.name, &token).await;

    info!(user_id = user.id, email = %Redacted(&user.email), "user registered");

    Ok(Registration {
        user_id: user.id,
        confirmation_token: token,
    })
}

/// Validate registration input; returns the normalized name.
fn validate_registration(email: &str, name: &str, password: &str) -> Result<String, AppError> {
    if !is_valid_email(email) {
        return Err(
            DomainError::validation(ValidationKind::EmailFormat, "Email format not valid").into(),
        );
    }

    let name: String = name.trim().nfc().collect();
    if name.is_empty() {
        return Err(DomainError::validation_other("Name must not be empty").into());
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation_other(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }

    Ok(name)
}

async fn send_confirmation_email(state: &AppState, to: &str, name: &str, token: &str) {
    let link = state.mail.confirm_link(token);
    let body = build_confirmation_email(&link, SITE_NAME, name);
    if let Err(err) = state.mailer.send(to, CONFIRMATION_SUBJECT, &body).await {
        warn!(error = %err, to = %Redacted(to), "confirmation email delivery failed");
    }
}

/// Exchange email + password for a fresh JWT.
///
/// Every previously stored token for the user is marked logged out before the
/// new one is persisted, so at most one token stays live per login.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match users::find_by_email(conn, email).await? {
        Some(user) => user,
        None => {
            security::login_failed("unknown_email", Some(email));
            return Err(DomainError::not_found(NotFoundKind::User, "User not found").into());
        }
    };

    if !verify_password(password, &user.password_hash)? {
        security::login_failed("bad_password", Some(email));
        return Err(DomainError::credentials("Email or password did not match").into());
    }

    let revoked = tokens::revoke_all_for_user(conn, user.id).await?;
    if revoked > 0 {
        debug!(user_id = user.id, revoked, "revoked live tokens before reissue");
    }

    let token = mint_access_token(user.id, &user.email, SystemTime::now(), &state.security)?;
    tokens::insert_jwt(conn, JwtTokenCreate::new(token.clone(), user.id)).await?;

    info!(user_id = user.id, "user authenticated");
    Ok(token)
}

/// Redeem an email confirmation token.
///
/// Single use and time bounded: a confirmed or expired token fails without
/// touching the user row.
pub async fn confirm_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<(), AppError> {
    let record = tokens::find_confirmation_by_token(conn, token)
        .await?
        .ok_or_else(|| DomainError::token(TokenErrorKind::NotFound, "Token not found"))?;

    if record.is_confirmed() {
        return Err(DomainError::token(
            TokenErrorKind::AlreadyConfirmed,
            "Email already confirmed",
        )
        .into());
    }

    let now = OffsetDateTime::now_utc();
    if record.is_expired_at(now) {
        return Err(DomainError::token(TokenErrorKind::Expired, "Token expired").into());
    }

    tokens::mark_confirmed(conn, record.id, now).await?;
    users::mark_email_confirmed(conn, record.user_id, now).await?;

    info!(user_id = record.user_id, "email confirmed");
    Ok(())
}
