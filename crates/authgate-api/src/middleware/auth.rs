//! Access-token middleware.
//!
//! Routes behind this middleware never reach their handler without
//! verified access claims attached to the request extensions.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use authgate_core::error::AppError;

use crate::cookies::{self, ACCESS_COOKIE};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Verifies the access token and attaches its claims to the request.
///
/// The credential is taken from the `Authorization: Bearer` header first,
/// falling back to the access-token cookie. Missing, malformed, expired,
/// or badly signed tokens all reject the request before any handler runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_access_token(request.headers())
            .ok_or_else(|| AppError::authentication("Missing access token"))?;
        state.jwt_decoder.verify_access(token)?
    };

    request.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(request).await)
}

/// Locate the access credential: bearer header first, cookie second.
///
/// Some clients serialize an absent token as the literal string
/// "undefined"; that counts as no credential.
fn extract_access_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.is_empty() && token != "undefined" {
                return Some(token);
            }
        }
    }

    cookies::get_cookie(headers, ACCESS_COOKIE)
}
