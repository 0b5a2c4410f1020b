//! Token creation for the access and refresh signing contexts.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;
use authgate_entity::user::User;

use super::claims::{AccessClaims, RefreshClaims};

/// Creates signed access (RS256) and refresh (HS256) tokens.
///
/// Key material is loaded once at construction; an unreadable private key
/// is a configuration failure surfaced at startup, never a client error.
#[derive(Clone)]
pub struct JwtEncoder {
    /// RSA private key for signing access tokens.
    access_key: EncodingKey,
    /// HMAC secret for signing refresh tokens.
    refresh_key: EncodingKey,
    /// Issuer claim stamped into every token.
    issuer: String,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates an encoder from an in-memory private key PEM.
    pub fn new(private_key_pem: &[u8], config: &AuthConfig) -> Result<Self, AppError> {
        let access_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| AppError::configuration(format!("Invalid RSA private key: {e}")))?;

        Ok(Self {
            access_key,
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        })
    }

    /// Creates an encoder by reading the private key path named in config.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let pem = std::fs::read(&config.access_private_key_path).map_err(|e| {
            AppError::configuration(format!(
                "Failed to read private key '{}': {e}",
                config.access_private_key_path
            ))
        })?;
        Self::new(&pem, config)
    }

    /// Signs an access token for the given identity.
    pub fn sign_access(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = AccessClaims {
            sub: user.id.to_string(),
            role: user.role,
            tenant: user.tenant_id.map(|t| t.to_string()),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }

    /// Signs a refresh token bound to the given refresh session id.
    pub fn sign_refresh(&self, user: &User, session_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::days(self.refresh_ttl_days);

        let claims = RefreshClaims {
            sub: user.id.to_string(),
            role: user.role,
            tenant: user.tenant_id.map(|t| t.to_string()),
            id: session_id.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))
    }
}
