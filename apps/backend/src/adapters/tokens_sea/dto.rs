//! DTOs for tokens_sea adapter.

use time::OffsetDateTime;

/// DTO for persisting a freshly issued JWT.
#[derive(Debug, Clone)]
pub struct JwtTokenCreate {
    pub token: String,
    pub user_id: i64,
}

impl JwtTokenCreate {
    pub fn new(token: impl Into<String>, user_id: i64) -> Self {
        Self {
            token: token.into(),
            user_id,
        }
    }
}

/// DTO for creating a new email confirmation token.
#[derive(Debug, Clone)]
pub struct ConfirmationTokenCreate {
    pub token: String,
    pub user_id: i64,
    pub expires_at: OffsetDateTime,
}

impl ConfirmationTokenCreate {
    pub fn new(token: impl Into<String>, user_id: i64, expires_at: OffsetDateTime) -> Self {
        Self {
            token: token.into(),
            user_id,
            expires_at,
        }
    }
}
