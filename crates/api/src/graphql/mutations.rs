use std::sync::Arc;

use async_graphql::{Context, Object, Result, ID};
use uuid::Uuid;

use domain::models::disaster::{normalize_bulk_create, normalize_bulk_update};
use persistence::DisasterStore;

use super::types::*;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates a disaster record; the store assigns id and timestamps.
    async fn create_disaster(
        &self,
        ctx: &Context<'_>,
        input: CreateDisasterInput,
    ) -> Result<GqlDisaster> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();

        let new = input.into_request().normalize().map_err(validation_error)?;
        let disaster = store.create(new).await.map_err(store_error)?;
        Ok(disaster.into())
    }

    /// Merges the non-null input fields into an existing record.
    async fn update_disaster(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateDisasterInput,
    ) -> Result<GqlDisaster> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();
        let id = Uuid::parse_str(&id).map_err(|_| malformed_id_error())?;

        let patch = input.into_request().normalize().map_err(validation_error)?;
        store
            .update(id, patch)
            .await
            .map_err(store_error)?
            .map(GqlDisaster::from)
            .ok_or_else(not_found_error)
    }

    /// Hard-deletes a record; errors with NOT_FOUND when the id is absent.
    async fn delete_disaster(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();
        let id = Uuid::parse_str(&id).map_err(|_| malformed_id_error())?;

        if store.delete(id).await.map_err(store_error)? {
            Ok(true)
        } else {
            Err(not_found_error())
        }
    }

    /// Inserts 1..=100 records all-or-nothing; any invalid item rejects the
    /// whole batch.
    async fn bulk_insert_disasters(
        &self,
        ctx: &Context<'_>,
        items: Vec<CreateDisasterInput>,
    ) -> Result<Vec<GqlDisaster>> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();

        let requests: Vec<_> = items.into_iter().map(|i| i.into_request()).collect();
        let new = normalize_bulk_create(&requests).map_err(validation_error)?;
        let disasters = store.bulk_insert(new).await.map_err(bulk_store_error)?;
        Ok(disasters.into_iter().map(GqlDisaster::from).collect())
    }

    /// Applies 1..=100 partial updates in one transaction. Well-formed but
    /// nonexistent ids count as matched, not modified.
    async fn bulk_update_disasters(
        &self,
        ctx: &Context<'_>,
        items: Vec<BulkUpdateDisasterInput>,
    ) -> Result<GqlBulkUpdateResult> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();

        let raw: Vec<_> = items.into_iter().map(|i| i.into_item()).collect();
        let updates = normalize_bulk_update(&raw).map_err(validation_error)?;
        let outcome = store.bulk_update(updates).await.map_err(bulk_store_error)?;
        Ok(outcome.into())
    }
}
