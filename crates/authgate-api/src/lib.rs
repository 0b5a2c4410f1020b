//! # authgate-api
//!
//! HTTP API layer for Authgate built on Axum.
//!
//! Provides the REST endpoints, middleware (token verification, refresh
//! validation, role guard, request logging), cookie handling, extractors,
//! DTOs, and error mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
