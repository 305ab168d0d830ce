//! Repository functions for domain layer.

pub mod calendar;
pub mod comments;
pub mod tokens;
pub mod users;
