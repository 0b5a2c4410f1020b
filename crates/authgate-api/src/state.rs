//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authgate_auth::identity::IdentityStore;
use authgate_auth::jwt::JwtDecoder;
use authgate_auth::session::{SessionManager, SessionStore};
use authgate_auth::tenancy::TenantStore;
use authgate_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the stores are
/// capability interfaces so tests can substitute in-memory
/// implementations.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session lifecycle orchestrator.
    pub session_manager: Arc<SessionManager>,
    /// Token verifier for both signing contexts.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Identity store.
    pub identity_store: Arc<dyn IdentityStore>,
    /// Refresh session store (the revocation list).
    pub session_store: Arc<dyn SessionStore>,
    /// Tenant store.
    pub tenant_store: Arc<dyn TenantStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}
