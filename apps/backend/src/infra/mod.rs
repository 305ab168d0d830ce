//! Infrastructure wiring: database bootstrap, driver error mapping, and the
//! application state builder.

pub mod db;
pub mod db_errors;
pub mod state;
