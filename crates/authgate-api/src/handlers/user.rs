//! User management handlers (admin surface).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::info;
use validator::Validate;

use authgate_auth::session::NewIdentity;
use authgate_core::error::AppError;
use authgate_core::types::pagination::{PageRequest, PageResponse};
use authgate_entity::user::UpdateUser;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, IdResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IdResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .session_manager
        .create_identity(NewIdentity {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            role: req.role,
            tenant_id: req.tenant_id,
        })
        .await?;

    info!(user_id = user.id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(IdResponse { id: user.id })),
    ))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = PageRequest::new(page.page, page.page_size);
    let users = state.identity_store.list(&page).await?;
    let page_response = PageResponse::new(
        users.items.into_iter().map(UserResponse::from).collect(),
        users.page,
        users.page_size,
        users.total_items,
    );
    Ok(Json(ApiResponse::ok(page_response)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .identity_store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .identity_store
        .update(
            id,
            &UpdateUser {
                first_name: req.first_name,
                last_name: req.last_name,
                role: req.role,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!(user_id = id, "User updated");
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<IdResponse>>, ApiError> {
    let deleted = state.identity_store.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("User not found").into());
    }

    info!(user_id = id, "User deleted");
    Ok(Json(ApiResponse::ok(IdResponse { id })))
}
