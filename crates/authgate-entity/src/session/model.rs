//! Refresh session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The durable row backing one outstanding refresh token.
///
/// A row exists if and only if its refresh token is currently valid for
/// use; deleting the row is the sole revocation mechanism. Rows are
/// created on register, login, and refresh (rotation), and destroyed on
/// logout and rotation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshSession {
    /// Surrogate identifier, generated by the store. Embedded into the
    /// refresh token's claims as its unique identifier.
    pub id: i64,
    /// The identity this session belongs to.
    pub user_id: i64,
    /// Absolute expiry, set at creation to now + refresh TTL.
    pub expires_at: DateTime<Utc>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session was last updated.
    pub updated_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Check whether the session row has outlived its token's TTL.
    ///
    /// Expired-but-present rows are harmless (the token codec rejects
    /// expired tokens before revocation is consulted), so this exists only
    /// for the optional cleanup job.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
