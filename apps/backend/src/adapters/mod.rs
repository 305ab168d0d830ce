//! Adapters for external dependencies.

pub mod calendar_sea;
pub mod comments_sea;
pub mod tokens_sea;
pub mod users_sea;
