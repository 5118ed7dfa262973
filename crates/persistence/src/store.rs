//! Storage abstraction for disaster records.

use async_trait::async_trait;
use uuid::Uuid;

use domain::models::disaster::{
    BulkUpdateOutcome, Disaster, DisasterFilter, DisasterPatch, NearParams, NewDisaster,
};

/// Errors surfaced by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected before reaching the database.
    #[error("{0}")]
    Validation(String),

    /// Query or connection failure; carries the backend message.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Filter plus pagination window for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub filter: DisasterFilter,
    pub skip: i64,
    pub limit: i64,
}

/// Storage operations for disaster records.
///
/// One implementation exists (`DisasterRepository`, PostGIS-backed); the
/// trait keeps handlers testable and the storage choice swappable.
#[async_trait]
pub trait DisasterStore: Send + Sync {
    /// Inserts a new record; the store assigns id and timestamps.
    async fn create(&self, input: NewDisaster) -> Result<Disaster, StoreError>;

    /// Lists records matching the filter, newest first.
    async fn list(&self, params: ListParams) -> Result<Vec<Disaster>, StoreError>;

    /// Counts records matching the filter.
    async fn count(&self, filter: &DisasterFilter) -> Result<i64, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Disaster>, StoreError>;

    /// Merges the patch into an existing record. `None` when the id is
    /// absent. An empty patch re-reads without bumping `updated_at`.
    async fn update(&self, id: Uuid, patch: DisasterPatch)
        -> Result<Option<Disaster>, StoreError>;

    /// Hard delete. `false` when the id was already absent.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Inserts all items in one batch write; all-or-nothing.
    async fn bulk_insert(&self, items: Vec<NewDisaster>) -> Result<Vec<Disaster>, StoreError>;

    /// Applies each patch inside one transaction. Nonexistent ids count
    /// toward `matched_count` but not `modified_count`.
    async fn bulk_update(
        &self,
        items: Vec<(Uuid, DisasterPatch)>,
    ) -> Result<BulkUpdateOutcome, StoreError>;

    /// Records within `distance_km` of the point, nearest first.
    async fn find_near(&self, params: NearParams) -> Result<Vec<Disaster>, StoreError>;
}
