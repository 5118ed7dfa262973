//! GraphQL surface, mirroring the REST semantics over the same store.

pub mod mutations;
pub mod schema;
pub mod types;

pub use schema::{build_schema, DisasterSchema};

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;

use crate::app::AppState;

/// POST /graphql
pub async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}
