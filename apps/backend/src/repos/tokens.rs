//! Token repository functions for domain layer (generic over ConnectionTrait).
//!
//! Covers both stored JWTs (session revocation) and email confirmation
//! tokens (account activation).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::tokens_sea as tokens_adapter;
use crate::errors::domain::DomainError;

pub use tokens_adapter::{ConfirmationTokenCreate, JwtTokenCreate};

/// Stored JWT domain model
#[derive(Debug, Clone, PartialEq)]
pub struct JwtTokenRecord {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub logged_out: bool,
    pub created_at: OffsetDateTime,
}

impl JwtTokenRecord {
    pub fn is_live(&self) -> bool {
        !self.logged_out
    }
}

/// Email confirmation token domain model
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationTokenRecord {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub confirmed_at: Option<OffsetDateTime>,
}

impl ConfirmationTokenRecord {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

// Free functions (generic) mirroring the previous trait methods

pub async fn insert_jwt<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: JwtTokenCreate,
) -> Result<JwtTokenRecord, DomainError> {
    let record = tokens_adapter::insert_jwt(conn, dto).await?;
    Ok(JwtTokenRecord::from(record))
}

pub async fn find_jwt_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<JwtTokenRecord>, DomainError> {
    let record = tokens_adapter::find_jwt_by_token(conn, token).await?;
    Ok(record.map(JwtTokenRecord::from))
}

/// Revoke every live JWT the user holds. Returns how many were revoked.
pub async fn revoke_all_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, DomainError> {
    let revoked = tokens_adapter::revoke_all_for_user(conn, user_id).await?;
    Ok(revoked)
}

pub async fn insert_confirmation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ConfirmationTokenCreate,
) -> Result<ConfirmationTokenRecord, DomainError> {
    let record = tokens_adapter::insert_confirmation(conn, dto).await?;
    Ok(ConfirmationTokenRecord::from(record))
}

pub async fn find_confirmation_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<ConfirmationTokenRecord>, DomainError> {
    let record = tokens_adapter::find_confirmation_by_token(conn, token).await?;
    Ok(record.map(ConfirmationTokenRecord::from))
}

pub async fn mark_confirmed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token_id: i64,
    confirmed_at: OffsetDateTime,
) -> Result<ConfirmationTokenRecord, DomainError> {
    let record = tokens_adapter::mark_confirmed(conn, token_id, confirmed_at).await?;
    Ok(ConfirmationTokenRecord::from(record))
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::jwt_tokens::Model> for JwtTokenRecord {
    fn from(model: crate::entities::jwt_tokens::Model) -> Self {
        Self {
            id: model.id,
            token: model.token,
            user_id: model.user_id,
            logged_out: model.logged_out,
            created_at: model.created_at,
        }
    }
}

impl From<crate::entities::confirmation_tokens::Model> for ConfirmationTokenRecord {
    fn from(model: crate::entities::confirmation_tokens::Model) -> Self {
        Self {
            id: model.id,
            token: model.token,
            user_id: model.user_id,
            created_at: model.created_at,
            expires_at: model.expires_at,
            confirmed_at: model.confirmed_at,
        }
    }
}
