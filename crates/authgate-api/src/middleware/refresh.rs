//! Refresh-token middleware.
//!
//! The refresh credential is read strictly from its cookie — never from
//! headers. Signature verification alone is not enough: the backing
//! session row must still exist, otherwise the token has been revoked.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use authgate_core::error::AppError;

use crate::cookies::{self, REFRESH_COOKIE};
use crate::error::ApiError;
use crate::extractors::RefreshAuth;
use crate::state::AppState;

/// Verifies the refresh token and its revocation state, then attaches
/// its claims to the request.
///
/// A token whose session row is gone fails with the same outcome as a bad
/// signature: the caller cannot tell "never issued" from "revoked" from
/// "expired".
pub async fn validate_refresh(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = cookies::get_cookie(request.headers(), REFRESH_COOKIE)
            .ok_or_else(|| AppError::authentication("Missing refresh token"))?;
        state.jwt_decoder.verify_refresh(token)?
    };

    let session_id = claims.session_id()?;
    let user_id = claims.user_id()?;

    let active = state.session_store.find_active(session_id, user_id).await?;
    if active.is_none() {
        return Err(AppError::authentication("Refresh token has been revoked").into());
    }

    request.extensions_mut().insert(RefreshAuth(claims));
    Ok(next.run(request).await)
}
