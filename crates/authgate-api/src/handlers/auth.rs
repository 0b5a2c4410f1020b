//! Auth handlers — register, login, refresh, logout, self.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::debug;
use validator::Validate;

use authgate_auth::session::{IssuedTokens, NewIdentity};
use authgate_core::error::AppError;
use authgate_entity::user::UserRole;

use crate::cookies::{self, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, IdResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, RefreshAuth};
use crate::state::AppState;

/// POST /api/auth/register
///
/// Self-service registration always creates a customer; privileged roles
/// come from the admin surface.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    debug!(email = %req.email, "New registration request");

    let auth = state
        .session_manager
        .register(NewIdentity {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            role: UserRole::Customer,
            tenant_id: None,
        })
        .await?;

    session_response(
        StatusCode::CREATED,
        &state,
        &auth.tokens,
        IdResponse { id: auth.user.id },
    )
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let auth = state.session_manager.login(&req.email, &req.password).await?;

    session_response(
        StatusCode::OK,
        &state,
        &auth.tokens,
        IdResponse { id: auth.user.id },
    )
}

/// POST /api/auth/refresh
///
/// Runs behind the refresh middleware: the claims here have already
/// passed signature and revocation checks.
pub async fn refresh(
    State(state): State<AppState>,
    RefreshAuth(claims): RefreshAuth,
) -> Result<Response, ApiError> {
    let auth = state.session_manager.refresh(&claims).await?;

    session_response(
        StatusCode::OK,
        &state,
        &auth.tokens,
        IdResponse { id: auth.user.id },
    )
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    RefreshAuth(claims): RefreshAuth,
) -> Result<Response, ApiError> {
    state.session_manager.logout(&claims).await?;

    let domain = &state.config.auth.cookie_domain;
    let mut response = Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
    .into_response();

    for cookie in [
        cookies::expired_cookie(ACCESS_COOKIE, domain),
        cookies::expired_cookie(REFRESH_COOKIE, domain),
    ] {
        append_set_cookie(&mut response, &cookie)?;
    }
    Ok(response)
}

/// GET /api/auth/self
pub async fn whoami(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.session_manager.profile(claims.user_id()?).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// Builds a response carrying both auth cookies alongside the JSON body.
fn session_response<T: Serialize>(
    status: StatusCode,
    state: &AppState,
    tokens: &IssuedTokens,
    body: T,
) -> Result<Response, ApiError> {
    let auth_config = &state.config.auth;
    let mut response = (status, Json(ApiResponse::ok(body))).into_response();

    for cookie in [
        cookies::auth_cookie(
            ACCESS_COOKIE,
            &tokens.access_token,
            &auth_config.cookie_domain,
            auth_config.access_ttl_seconds(),
        ),
        cookies::auth_cookie(
            REFRESH_COOKIE,
            &tokens.refresh_token,
            &auth_config.cookie_domain,
            auth_config.refresh_ttl_seconds(),
        ),
    ] {
        append_set_cookie(&mut response, &cookie)?;
    }
    Ok(response)
}

/// Appends one Set-Cookie header to a response.
fn append_set_cookie(response: &mut Response, cookie: &str) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::internal(format!("Invalid cookie value: {e}")))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}
