//! Claims payloads carried by access and refresh tokens.

use serde::{Deserialize, Serialize};

use authgate_core::error::AppError;
use authgate_entity::user::UserRole;

/// Claims payload of an access token.
///
/// Wire shape: `{sub, role, tenant?, iss, iat, exp}`. The subject is the
/// string-encoded identity id. Nothing in here is trusted until the RS256
/// signature has been verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the identity id, string-encoded.
    pub sub: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Tenant id, string-encoded, for tenant-scoped identities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Parse the subject claim back into an identity id.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::authentication("Token subject is not a valid identity id"))
    }
}

/// Claims payload of a refresh token.
///
/// Same fields as [`AccessClaims`] plus `id` — the refresh session row id,
/// the token's unique identifier for revocation lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject — the identity id, string-encoded.
    pub sub: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Tenant id, string-encoded, for tenant-scoped identities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Refresh session id, string-encoded.
    pub id: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl RefreshClaims {
    /// Parse the subject claim back into an identity id.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::authentication("Token subject is not a valid identity id"))
    }

    /// Parse the embedded session id.
    pub fn session_id(&self) -> Result<i64, AppError> {
        self.id
            .parse()
            .map_err(|_| AppError::authentication("Token session id is not valid"))
    }
}
