//! Extractors that pull verified claims out of the request context.
//!
//! The middleware attaches claims to request extensions; these extractors
//! hand them to handlers. A handler asking for claims on a route that
//! never ran the matching middleware is rejected, not silently continued.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authgate_auth::jwt::{AccessClaims, RefreshClaims};
use authgate_core::error::AppError;

use crate::error::ApiError;

/// Verified access-token claims attached by the access middleware.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AccessClaims);

impl std::ops::Deref for AuthUser {
    type Target = AccessClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::authentication("Missing authentication context").into())
    }
}

/// Verified refresh-token claims attached by the refresh middleware.
#[derive(Debug, Clone)]
pub struct RefreshAuth(pub RefreshClaims);

impl std::ops::Deref for RefreshAuth {
    type Target = RefreshClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RefreshAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RefreshAuth>()
            .cloned()
            .ok_or_else(|| AppError::authentication("Missing refresh context").into())
    }
}
