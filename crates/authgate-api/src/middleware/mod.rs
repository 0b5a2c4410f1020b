//! Request middleware: token verification, refresh validation, role
//! guard, and request logging.

pub mod auth;
pub mod logging;
pub mod rbac;
pub mod refresh;
