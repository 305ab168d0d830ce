//! Domain services: validation and orchestration between routes and repos.

pub mod auth;
pub mod calendar;
pub mod comments;
