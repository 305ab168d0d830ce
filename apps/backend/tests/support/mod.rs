#![allow(dead_code)]

pub mod auth_helper;
pub mod factory;

pub use app_builder::{spawn_app, spawn_app_without_db, TestApp};
