//! Tenant management handlers (admin surface).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::info;
use validator::Validate;

use authgate_core::error::AppError;
use authgate_core::types::pagination::{PageRequest, PageResponse};
use authgate_entity::tenant::{CreateTenant, Tenant, UpdateTenant};

use crate::dto::request::{CreateTenantRequest, UpdateTenantRequest};
use crate::dto::response::{ApiResponse, IdResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(req): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IdResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = state
        .tenant_store
        .create(&CreateTenant {
            name: req.name,
            address: req.address,
        })
        .await?;

    info!(tenant_id = tenant.id, "Tenant created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(IdResponse { id: tenant.id })),
    ))
}

/// GET /api/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<Tenant>>>, ApiError> {
    let page = PageRequest::new(page.page, page.page_size);
    let tenants = state.tenant_store.list(&page).await?;
    Ok(Json(ApiResponse::ok(tenants)))
}

/// GET /api/tenants/{id}
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state
        .tenant_store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Tenant not found"))?;
    Ok(Json(ApiResponse::ok(tenant)))
}

/// PATCH /api/tenants/{id}
pub async fn update_tenant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTenantRequest>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state
        .tenant_store
        .update(
            id,
            &UpdateTenant {
                name: req.name,
                address: req.address,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("Tenant not found"))?;

    info!(tenant_id = id, "Tenant updated");
    Ok(Json(ApiResponse::ok(tenant)))
}

/// DELETE /api/tenants/{id}
pub async fn delete_tenant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<IdResponse>>, ApiError> {
    let deleted = state.tenant_store.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("Tenant not found").into());
    }

    info!(tenant_id = id, "Tenant deleted");
    Ok(Json(ApiResponse::ok(IdResponse { id })))
}
