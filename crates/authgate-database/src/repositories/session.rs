//! Refresh session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::session::RefreshSession;

/// Repository for refresh session rows.
///
/// The table is the revocation list: a refresh token is usable exactly
/// while its row exists.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new session row for a user.
    ///
    /// Multiple simultaneous sessions per identity are permitted
    /// (multi-device login), so there is no uniqueness constraint on
    /// `user_id`.
    pub async fn create(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshSession> {
        sqlx::query_as::<_, RefreshSession>(
            "INSERT INTO refresh_sessions (user_id, expires_at) \
             VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Find a session scoped by both id and owner.
    ///
    /// The owner scope means a forged session id cannot be matched to
    /// another identity's session.
    pub async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> AppResult<Option<RefreshSession>> {
        sqlx::query_as::<_, RefreshSession>(
            "SELECT * FROM refresh_sessions WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Delete a session row by id. Deleting a non-existent id is not an
    /// error.
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM refresh_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;
        Ok(())
    }

    /// Delete rows whose expiry has passed. Optional operational cleanup;
    /// correctness does not depend on it.
    pub async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
