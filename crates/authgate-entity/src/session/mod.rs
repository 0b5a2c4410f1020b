//! Refresh session domain entities.

pub mod model;

pub use model::RefreshSession;
