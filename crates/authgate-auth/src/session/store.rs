//! Refresh session store trait and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::Utc;

use authgate_core::config::auth::AuthConfig;
use authgate_core::result::AppResult;
use authgate_database::repositories::SessionRepository;
use authgate_entity::session::RefreshSession;

/// Persistence for refresh session rows — the revocation list.
///
/// Concurrent creation for the same owner always succeeds: multiple
/// simultaneous sessions per identity are permitted by design
/// (multi-device login).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session row for the identity, expiring one refresh TTL
    /// from now, and return it with its generated id.
    async fn create(&self, user_id: i64) -> AppResult<RefreshSession>;

    /// Find a session scoped by both id and owner. Used only for
    /// revocation checks; the owner scope keeps a forged id from matching
    /// another identity's session.
    async fn find_active(&self, id: i64, user_id: i64) -> AppResult<Option<RefreshSession>>;

    /// Delete a session row. Idempotent: a non-existent id is not an error.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// PostgreSQL-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    repo: SessionRepository,
    refresh_ttl_days: i64,
}

impl PgSessionStore {
    /// Creates a store wrapping the session repository.
    pub fn new(repo: SessionRepository, config: &AuthConfig) -> Self {
        Self {
            repo,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, user_id: i64) -> AppResult<RefreshSession> {
        let expires_at = Utc::now() + chrono::Duration::days(self.refresh_ttl_days);
        self.repo.create(user_id, expires_at).await
    }

    async fn find_active(&self, id: i64, user_id: i64) -> AppResult<Option<RefreshSession>> {
        self.repo.find_by_id_and_user(id, user_id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.repo.delete_by_id(id).await
    }
}
