//! Handler extractors for verified claims.

pub mod auth;

pub use auth::{AuthUser, RefreshAuth};
