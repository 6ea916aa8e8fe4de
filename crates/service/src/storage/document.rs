use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, sync::RwLock};
use uuid::Uuid;

use models::record::{Record, ResourceFields};

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// JSON-file-backed document store for one resource type.
///
/// Keeps the full record list in memory behind an RwLock and persists it to
/// a JSON file after every mutation; records stay in insertion order. The
/// write lock is held across each read-modify-write, which makes the
/// version compare-and-swap atomic.
pub struct DocumentStore<F> {
    inner: Arc<RwLock<Vec<Record<F>>>>,
    file_path: PathBuf,
}

impl<F: ResourceFields> DocumentStore<F> {
    /// Load the store from a path. Creates the file with an empty list if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let records: Vec<Record<F>> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: Vec<Record<F>> = Vec::new();
                fs::write(
                    &file_path,
                    serde_json::to_vec(&empty).map_err(|e| ServiceError::Db(e.to_string()))?,
                )
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(records)), file_path }))
    }

    async fn save(&self) -> Result<(), ServiceError> {
        let records = self.inner.read().await;
        let data = serde_json::to_vec(&*records).map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl<F: ResourceFields> ResourceStore<F> for DocumentStore<F> {
    async fn insert(&self, fields: F) -> Result<Record<F>, ServiceError> {
        let now = Utc::now();
        let rec = Record { id: Uuid::new_v4(), fields, created_at: now, updated_at: now, version: 0 };
        {
            let mut records = self.inner.write().await;
            records.push(rec.clone());
        }
        self.save().await?;
        Ok(rec)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record<F>>, ServiceError> {
        let records = self.inner.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Record<F>>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.inner.read().await.len() as u64)
    }

    async fn update(&self, record: Record<F>) -> Result<Record<F>, ServiceError> {
        let updated = {
            let mut records = self.inner.write().await;
            let Some(existing) = records.iter_mut().find(|r| r.id == record.id) else {
                return Err(ServiceError::not_found(F::RESOURCE));
            };
            if existing.version != record.version {
                return Err(ServiceError::conflict(F::RESOURCE));
            }
            existing.fields = record.fields;
            existing.version += 1;
            existing.updated_at = Utc::now();
            existing.clone()
        };
        self.save().await?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let existed = {
            let mut records = self.inner.write().await;
            let before = records.len();
            records.retain(|r| r.id != id);
            records.len() != before
        };
        self.save().await?;
        Ok(existed)
    }

    async fn delete_all(&self) -> Result<(), ServiceError> {
        self.inner.write().await.clear();
        self.save().await
    }
}
