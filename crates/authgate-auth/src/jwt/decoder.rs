//! Token verification for the access and refresh signing contexts.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};

/// Verifies access (RS256) and refresh (HS256) tokens.
///
/// Every verification failure collapses to a single unauthenticated
/// outcome at the HTTP boundary; the distinct reasons (expired, bad
/// signature, malformed, wrong algorithm) stay visible in server logs.
#[derive(Clone)]
pub struct JwtDecoder {
    /// RSA public key for verifying access tokens.
    access_key: DecodingKey,
    /// HMAC secret for verifying refresh tokens.
    refresh_key: DecodingKey,
    /// Validation rules for the access context.
    access_validation: Validation,
    /// Validation rules for the refresh context.
    refresh_validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("access_validation", &self.access_validation)
            .field("refresh_validation", &self.refresh_validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder from an in-memory public key PEM.
    pub fn new(public_key_pem: &[u8], config: &AuthConfig) -> Result<Self, AppError> {
        let access_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| AppError::configuration(format!("Invalid RSA public key: {e}")))?;

        let mut access_validation = Validation::new(Algorithm::RS256);
        access_validation.set_issuer(&[&config.issuer]);
        access_validation.leeway = 5; // seconds of clock skew tolerance

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.set_issuer(&[&config.issuer]);
        refresh_validation.leeway = 5;

        Ok(Self {
            access_key,
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_validation,
            refresh_validation,
        })
    }

    /// Creates a decoder by reading the public key path named in config.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let pem = std::fs::read(&config.access_public_key_path).map_err(|e| {
            AppError::configuration(format!(
                "Failed to read public key '{}': {e}",
                config.access_public_key_path
            ))
        })?;
        Self::new(&pem, config)
    }

    /// Verifies an access token and returns its claims.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(token, &self.access_key, &self.access_validation)
            .map(|data| data.claims)
            .map_err(|e| map_verification_error("access", e))
    }

    /// Verifies a refresh token's signature and expiry.
    ///
    /// This checks the signing context only; the revocation check against
    /// the session store is a separate, mandatory step for refresh tokens.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        decode::<RefreshClaims>(token, &self.refresh_key, &self.refresh_validation)
            .map(|data| data.claims)
            .map_err(|e| map_verification_error("refresh", e))
    }
}

/// Maps a jsonwebtoken error to an authentication failure with an
/// internally distinguishable reason.
fn map_verification_error(context: &str, e: jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;

    let reason = match e.kind() {
        ErrorKind::ExpiredSignature => "Token has expired",
        ErrorKind::InvalidSignature => "Invalid token signature",
        ErrorKind::InvalidAlgorithm => "Unexpected signing algorithm",
        ErrorKind::InvalidIssuer => "Invalid token issuer",
        ErrorKind::InvalidToken => "Malformed token",
        _ => "Token verification failed",
    };

    debug!(context, reason, error = %e, "Token rejected");
    AppError::authentication(reason)
}
