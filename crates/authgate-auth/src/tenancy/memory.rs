//! In-memory tenant store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use authgate_core::result::AppResult;
use authgate_core::types::pagination::{PageRequest, PageResponse};
use authgate_entity::tenant::{CreateTenant, Tenant, UpdateTenant};

use super::store::TenantStore;

/// Internal state for the memory-based tenant store.
#[derive(Debug, Default)]
struct InnerState {
    tenants: HashMap<i64, Tenant>,
    next_id: i64,
}

/// In-memory tenant store using a Tokio mutex for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryTenantStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryTenantStore {
    /// Creates an empty in-memory tenant store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tenant>> {
        let state = self.state.lock().await;
        Ok(state.tenants.get(&id).cloned())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Tenant>> {
        let state = self.state.lock().await;
        let mut tenants: Vec<Tenant> = state.tenants.values().cloned().collect();
        tenants.sort_by_key(|t| std::cmp::Reverse(t.created_at));

        let total = tenants.len() as u64;
        let items = tenants
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn create(&self, data: &CreateTenant) -> AppResult<Tenant> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let now = Utc::now();
        let tenant = Tenant {
            id: state.next_id,
            name: data.name.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        };
        state.tenants.insert(tenant.id, tenant.clone());
        Ok(tenant)
    }

    async fn update(&self, id: i64, data: &UpdateTenant) -> AppResult<Option<Tenant>> {
        let mut state = self.state.lock().await;
        let Some(tenant) = state.tenants.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            tenant.name = name.clone();
        }
        if let Some(address) = &data.address {
            tenant.address = address.clone();
        }
        tenant.updated_at = Utc::now();
        Ok(Some(tenant.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.tenants.remove(&id).is_some())
    }
}
