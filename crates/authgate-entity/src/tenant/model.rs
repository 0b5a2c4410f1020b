//! Tenant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An organizational tenant. Users may belong to at most one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
    /// When the tenant was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
}

/// Data for updating an existing tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTenant {
    /// New display name.
    pub name: Option<String>,
    /// New postal address.
    pub address: Option<String>,
}
