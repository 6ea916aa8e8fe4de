pub mod departments;
pub mod document;
pub mod users;

use async_trait::async_trait;
use uuid::Uuid;

use models::record::{Record, ResourceFields};

use crate::errors::ServiceError;

/// Keyed storage for one resource type.
///
/// Implementations own id assignment and the optimistic version counter.
/// `update` is a compare-and-swap keyed on `(id, version)`: of two
/// concurrent updates with the same base version exactly one succeeds and
/// the other observes `Conflict`.
#[async_trait]
pub trait ResourceStore<F: ResourceFields>: Send + Sync {
    /// Store new domain fields; assigns id, version 0, and both timestamps.
    async fn insert(&self, fields: F) -> Result<Record<F>, ServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record<F>>, ServiceError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<Record<F>>, ServiceError>;

    async fn count(&self) -> Result<u64, ServiceError>;

    /// Compare-and-swap update. Fails with `Conflict` when the supplied
    /// version is stale, `NotFound` when the id is absent.
    async fn update(&self, record: Record<F>) -> Result<Record<F>, ServiceError>;

    /// Returns whether a record existed. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn delete_all(&self) -> Result<(), ServiceError>;
}
