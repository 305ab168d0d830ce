//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: unified
//! logging initialization, unique test-data generators, and assertions for
//! the stable Problem Details error contract.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
