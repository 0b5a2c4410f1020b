//! In-memory refresh session store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use authgate_core::result::AppResult;
use authgate_entity::session::RefreshSession;

use super::store::SessionStore;

/// Refresh TTL applied by the in-memory store, matching the default config.
const REFRESH_TTL_DAYS: i64 = 365;

/// Internal state for the memory-based session store.
#[derive(Debug, Default)]
struct InnerState {
    sessions: HashMap<i64, RefreshSession>,
    next_id: i64,
}

/// In-memory session store using a Tokio mutex for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemorySessionStore {
    /// Creates an empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held. Test-side assertion helper.
    pub async fn len(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    /// Whether no rows are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: i64) -> AppResult<RefreshSession> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let now = Utc::now();
        let session = RefreshSession {
            id: state.next_id,
            user_id,
            expires_at: now + chrono::Duration::days(REFRESH_TTL_DAYS),
            created_at: now,
            updated_at: now,
        };
        state.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_active(&self, id: i64, user_id: i64) -> AppResult<Option<RefreshSession>> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .get(&id)
            .filter(|s| s.user_id == user_id)
            .cloned())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.sessions.remove(&id);
        Ok(())
    }
}
