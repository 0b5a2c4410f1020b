//! Tenant store trait and its PostgreSQL implementation.

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_core::types::pagination::{PageRequest, PageResponse};
use authgate_database::repositories::TenantRepository;
use authgate_entity::tenant::{CreateTenant, Tenant, UpdateTenant};

/// Read and write access to tenants.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Find a tenant by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tenant>>;

    /// List tenants with pagination.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Tenant>>;

    /// Create a new tenant.
    async fn create(&self, data: &CreateTenant) -> AppResult<Tenant>;

    /// Update a tenant.
    async fn update(&self, id: i64, data: &UpdateTenant) -> AppResult<Option<Tenant>>;

    /// Delete a tenant. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// PostgreSQL-backed tenant store.
#[derive(Debug, Clone)]
pub struct PgTenantStore {
    repo: TenantRepository,
}

impl PgTenantStore {
    /// Creates a store wrapping the tenant repository.
    pub fn new(repo: TenantRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tenant>> {
        self.repo.find_by_id(id).await
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Tenant>> {
        self.repo.find_all(page).await
    }

    async fn create(&self, data: &CreateTenant) -> AppResult<Tenant> {
        self.repo.create(data).await
    }

    async fn update(&self, id: i64, data: &UpdateTenant) -> AppResult<Option<Tenant>> {
        self.repo.update(id, data).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        self.repo.delete(id).await
    }
}
