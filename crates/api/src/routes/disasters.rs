//! Disaster CRUD endpoint handlers.
//!
//! Every handler serves both representations: JSON by default, protobuf when
//! the request's first Accept preference is exactly `application/x-protobuf`.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use domain::models::disaster::{
    normalize_bulk_create, normalize_bulk_update, BulkUpdateItem, BulkUpdateResponse,
    CreateDisasterRequest, DisasterResponse, ListDisastersQuery, ListDisastersResponse, NearQuery,
    UpdateDisasterRequest,
};
use persistence::{ListParams, StoreError};
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;
use crate::negotiation::{binary_negotiated, protobuf_response, respond};
use crate::wire;

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::MalformedId)
}

/// GET /disasters
pub async fn list_disasters(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListDisastersQuery>,
) -> Result<Response, ApiError> {
    let filter = query.filter().map_err(ApiError::Validation)?;
    let page = PageParams::from_page(query.page, query.limit);

    let disasters = state
        .store
        .list(ListParams {
            filter,
            skip: page.skip,
            limit: page.limit,
        })
        .await?;

    let binary = wire::disaster_list(&disasters);
    let json = ListDisastersResponse {
        data: disasters.into_iter().map(DisasterResponse::from).collect(),
    };
    Ok(respond(&headers, StatusCode::OK, json, binary))
}

/// GET /disasters/near
pub async fn find_near(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<NearQuery>,
) -> Result<Response, ApiError> {
    let params = query.normalize().map_err(ApiError::Validation)?;
    let disasters = state.store.find_near(params).await?;

    let binary = wire::disaster_list(&disasters);
    // Bare array, unlike the list endpoint's envelope.
    let json: Vec<DisasterResponse> = disasters.into_iter().map(DisasterResponse::from).collect();
    Ok(respond(&headers, StatusCode::OK, json, binary))
}

/// GET /disasters/:id
pub async fn get_disaster(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let disaster = state.store.get_by_id(id).await?.ok_or(ApiError::NotFound)?;

    let binary = wire::Disaster::from(&disaster);
    Ok(respond(
        &headers,
        StatusCode::OK,
        DisasterResponse::from(disaster),
        binary,
    ))
}

/// POST /disasters
pub async fn create_disaster(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateDisasterRequest>,
) -> Result<Response, ApiError> {
    let input = body.normalize().map_err(ApiError::Validation)?;
    let disaster = state.store.create(input).await?;

    let binary = wire::Disaster::from(&disaster);
    Ok(respond(
        &headers,
        StatusCode::CREATED,
        DisasterResponse::from(disaster),
        binary,
    ))
}

/// PUT /disasters/:id
pub async fn update_disaster(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateDisasterRequest>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let patch = body.normalize().map_err(ApiError::Validation)?;
    let disaster = state
        .store
        .update(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;

    let binary = wire::Disaster::from(&disaster);
    Ok(respond(
        &headers,
        StatusCode::OK,
        DisasterResponse::from(disaster),
        binary,
    ))
}

/// DELETE /disasters/:id
///
/// JSON callers get 204 with no body; binary callers get an explicit empty
/// message instead of an empty body.
pub async fn delete_disaster(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound);
    }

    if binary_negotiated(&headers) {
        Ok(protobuf_response(StatusCode::OK, &wire::Empty {}))
    } else {
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

/// POST /disasters/bulk
///
/// All-or-nothing: any invalid item rejects the batch, and the batch write
/// itself is a single statement.
pub async fn bulk_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Vec<CreateDisasterRequest>>,
) -> Result<Response, ApiError> {
    let items = normalize_bulk_create(&body).map_err(ApiError::Validation)?;
    let disasters = state
        .store
        .bulk_insert(items)
        .await
        .map_err(bulk_store_error)?;

    let binary = wire::disaster_list(&disasters);
    let json = ListDisastersResponse {
        data: disasters.into_iter().map(DisasterResponse::from).collect(),
    };
    Ok(respond(&headers, StatusCode::CREATED, json, binary))
}

/// PUT /disasters/bulk
pub async fn bulk_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Vec<BulkUpdateItem>>,
) -> Result<Response, ApiError> {
    let items = normalize_bulk_update(&body).map_err(ApiError::Validation)?;
    let outcome = state
        .store
        .bulk_update(items)
        .await
        .map_err(bulk_store_error)?;

    let binary = wire::BulkUpdateResult::from(&outcome);
    Ok(respond(
        &headers,
        StatusCode::OK,
        BulkUpdateResponse::from(outcome),
        binary,
    ))
}

/// Bulk write paths surface store failures as 400 with the backend message.
fn bulk_store_error(err: StoreError) -> ApiError {
    ApiError::invalid("items", &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = parse_id("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(parse_id("12345"), Err(ApiError::MalformedId)));
        assert!(matches!(parse_id(""), Err(ApiError::MalformedId)));
        assert!(matches!(
            parse_id("550e8400-e29b-41d4-a716"),
            Err(ApiError::MalformedId)
        ));
    }

    #[test]
    fn test_bulk_store_error_is_a_validation_failure() {
        let err = bulk_store_error(StoreError::Validation("type must not be blank".to_string()));
        match err {
            ApiError::Validation(details) => {
                assert_eq!(details[0].field, "items");
                assert_eq!(details[0].message, "type must not be blank");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
