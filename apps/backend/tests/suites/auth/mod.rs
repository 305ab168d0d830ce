pub mod authenticate;
pub mod confirm;
