//! Error codes for the ClassMate backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the ClassMate backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// JWT token was revoked by a later login
    TokenRevoked,
    /// Email or password did not match
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// User not found in database
    ForbiddenUserNotFound,
    /// Caller is not the author of the comment
    NotCommentAuthor,
    /// Caller is not the owner of the calendar event
    NotEventOwner,

    // Request Validation
    /// Email address does not have a valid format
    EmailFormatNotValid,
    /// General validation error
    Validation,
    /// Request body is not valid JSON
    InvalidJson,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Comment not found
    CommentNotFound,
    /// Calendar event not found
    EventNotFound,
    /// General not found error
    NotFound,

    // Confirmation token lifecycle
    /// Confirmation token not found
    TokenNotFound,
    /// Confirmation token was already used
    TokenAlreadyConfirmed,
    /// Confirmation token is past its expiry
    TokenExpired,

    // Business Logic Conflicts
    /// Email is already registered
    EmailAlreadyTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotEventOwner => "NOT_EVENT_OWNER",

            // Request Validation
            Self::EmailFormatNotValid => "EMAIL_FORMAT_NOT_VALID",
            Self::Validation => "VALIDATION",
            Self::InvalidJson => "INVALID_JSON",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Confirmation token lifecycle
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::TokenAlreadyConfirmed => "TOKEN_ALREADY_CONFIRMED",
            Self::TokenExpired => "TOKEN_EXPIRED",

            // Business Logic Conflicts
            Self::EmailAlreadyTaken => "EMAIL_ALREADY_TAKEN",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
