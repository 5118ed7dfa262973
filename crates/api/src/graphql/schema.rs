use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Result, Schema, ID};
use uuid::Uuid;

use domain::models::disaster::{ListDisastersQuery, NearParams, NearQuery};
use persistence::{DisasterStore, ListParams};
use shared::pagination::PageParams;

use super::mutations::MutationRoot;
use super::types::*;

pub type DisasterSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// One page of disasters matching the filter, newest first, plus the
    /// total count for the filter.
    async fn disasters(
        &self,
        ctx: &Context<'_>,
        page: Option<i64>,
        limit: Option<i64>,
        #[graphql(name = "type")] kind: Option<String>,
        status: Option<String>,
        date_from: Option<String>,
        date_to: Option<String>,
    ) -> Result<DisasterPage> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();

        let query = ListDisastersQuery {
            page,
            limit,
            kind,
            status,
            date_from,
            date_to,
        };
        let filter = query.filter().map_err(validation_error)?;
        let params = PageParams::from_page(page, limit);

        let (data, total) = tokio::join!(
            store.list(ListParams {
                filter: filter.clone(),
                skip: params.skip,
                limit: params.limit,
            }),
            store.count(&filter),
        );

        Ok(DisasterPage {
            data: data
                .map_err(store_error)?
                .into_iter()
                .map(GqlDisaster::from)
                .collect(),
            total: total.map_err(store_error)?,
        })
    }

    /// A single disaster by id.
    async fn disaster(&self, ctx: &Context<'_>, id: ID) -> Result<GqlDisaster> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();
        let id = Uuid::parse_str(&id).map_err(|_| malformed_id_error())?;

        store
            .get_by_id(id)
            .await
            .map_err(store_error)?
            .map(GqlDisaster::from)
            .ok_or_else(not_found_error)
    }

    /// Disasters within `distance` kilometers of the point, nearest first.
    async fn disasters_near(
        &self,
        ctx: &Context<'_>,
        lat: f64,
        lng: f64,
        distance: f64,
    ) -> Result<Vec<GqlDisaster>> {
        let store = ctx.data_unchecked::<Arc<dyn DisasterStore>>();

        // Reuse the REST coercion path so the error messages match.
        let query = NearQuery {
            lat: Some(lat.to_string()),
            lng: Some(lng.to_string()),
            distance: Some(distance.to_string()),
        };
        let params: NearParams = query.normalize().map_err(validation_error)?;

        let disasters = store.find_near(params).await.map_err(store_error)?;
        Ok(disasters.into_iter().map(GqlDisaster::from).collect())
    }
}

pub fn build_schema(store: Arc<dyn DisasterStore>) -> DisasterSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}
