//! Role guard middleware.
//!
//! Runs strictly after the access-token middleware. A request whose
//! claims are missing (misordered wiring) is treated as forbidden, never
//! as an internal error that could be misread as success.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use authgate_core::error::AppError;
use authgate_entity::user::UserRole;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Permits the request only for admins.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    check_role(&request, &[UserRole::Admin])?;
    Ok(next.run(request).await)
}

/// Permits the request for admins and managers.
pub async fn require_manager(request: Request, next: Next) -> Result<Response, ApiError> {
    check_role(&request, &[UserRole::Admin, UserRole::Manager])?;
    Ok(next.run(request).await)
}

/// Checks the attached claims' role against the allowed set.
fn check_role(request: &Request, allowed: &[UserRole]) -> Result<(), AppError> {
    let Some(AuthUser(claims)) = request.extensions().get::<AuthUser>() else {
        return Err(AppError::authorization("Insufficient permissions"));
    };
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(AppError::authorization("Insufficient permissions"))
    }
}
