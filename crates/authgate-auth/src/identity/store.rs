//! Identity store trait and its PostgreSQL implementation.

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_core::types::pagination::{PageRequest, PageResponse};
use authgate_database::repositories::UserRepository;
use authgate_entity::user::{CreateUser, UpdateUser, User};

/// Read and write access to identities.
///
/// Rows returned here include the password digest; it never reaches a
/// client because the entity refuses to serialize it.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find an identity by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find an identity by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Create a new identity. Duplicate email is a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// List identities with pagination.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;

    /// Update an identity's name and role.
    async fn update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Delete an identity. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// PostgreSQL-backed identity store.
#[derive(Debug, Clone)]
pub struct PgIdentityStore {
    repo: UserRepository,
}

impl PgIdentityStore {
    /// Creates a store wrapping the user repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        self.repo.create(data).await
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        self.repo.find_all(page).await
    }

    async fn update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        self.repo.update(id, data).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        self.repo.delete(id).await
    }
}
