//! Logging helpers: PII redaction and security event logs.

pub mod pii;
pub mod security;
