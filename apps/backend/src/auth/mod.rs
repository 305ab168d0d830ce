//! Token minting/verification and password hashing.

pub mod jwt;
pub mod password;
