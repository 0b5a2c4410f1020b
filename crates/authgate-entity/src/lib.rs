//! # authgate-entity
//!
//! Domain entity models for Authgate. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod session;
pub mod tenant;
pub mod user;
