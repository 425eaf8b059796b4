pub mod auth;
pub mod snippet;
