use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use models::record::{Record, ResourceFields};

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// Business-facing CRUD over one resource store.
///
/// Absence is always a typed `NotFound` error; no caller ever sees a null
/// sentinel. Updates preserve `id` and `created_at` from the current record
/// and let the store bump the version.
pub struct ResourceService<F: ResourceFields> {
    store: Arc<dyn ResourceStore<F>>,
}

impl<F: ResourceFields> Clone for ResourceService<F> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<F: ResourceFields> ResourceService<F> {
    pub fn new(store: Arc<dyn ResourceStore<F>>) -> Self {
        Self { store }
    }

    pub async fn insert(&self, fields: F) -> Result<Record<F>, ServiceError> {
        fields.validate()?;
        let created = self.store.insert(fields).await?;
        info!(resource = F::RESOURCE, id = %created.id, "created");
        Ok(created)
    }

    pub async fn find_all(&self) -> Result<Vec<Record<F>>, ServiceError> {
        self.store.find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Record<F>, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(F::RESOURCE))
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.store.count().await
    }

    pub async fn update(&self, id: Uuid, fields: F) -> Result<Record<F>, ServiceError> {
        fields.validate()?;
        let mut current = self.find_by_id(id).await?;
        current.fields = fields;
        let updated = self.store.update(current).await?;
        info!(resource = F::RESOURCE, id = %updated.id, version = updated.version, "updated");
        Ok(updated)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError> {
        let existed = self.store.delete_by_id(id).await?;
        info!(resource = F::RESOURCE, %id, existed, "deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        self.store.delete_all().await
    }
}

pub type CommentService = ResourceService<models::comment::CommentFields>;
pub type UserService = ResourceService<models::user::UserFields>;
pub type DepartmentService = ResourceService<models::department::DepartmentFields>;
