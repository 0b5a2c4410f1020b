//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication, token, and cookie configuration.
///
/// The access context signs with an RSA private key and verifies with the
/// matching public key; the refresh context uses a single shared secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Issuer claim stamped into and required from every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Path to the PEM-encoded RSA private key for signing access tokens.
    #[serde(default = "default_private_key_path")]
    pub access_private_key_path: String,
    /// Path to the PEM-encoded RSA public key for verifying access tokens.
    #[serde(default = "default_public_key_path")]
    pub access_public_key_path: String,
    /// Shared secret for signing and verifying refresh tokens (HMAC-SHA256).
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Domain attribute on the auth cookies.
    #[serde(default = "default_cookie_domain")]
    pub cookie_domain: String,
}

impl AuthConfig {
    /// Access token TTL in whole seconds (cookie Max-Age).
    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_minutes * 60
    }

    /// Refresh token TTL in whole seconds (cookie Max-Age).
    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_ttl_days * 24 * 60 * 60
    }
}

fn default_issuer() -> String {
    "authgate".to_string()
}

fn default_private_key_path() -> String {
    "certs/private.pem".to_string()
}

fn default_public_key_path() -> String {
    "certs/public.pem".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    365
}

fn default_cookie_domain() -> String {
    "localhost".to_string()
}
