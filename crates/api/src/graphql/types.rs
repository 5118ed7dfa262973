//! GraphQL object and input types, plus error-extension helpers.
//!
//! Field values are identical to the REST JSON representation; only the
//! transport differs. Error extension codes (`NOT_FOUND`, `BAD_USER_INPUT`,
//! `INTERNAL_ERROR`) are a stable contract.

use async_graphql::{Error, ErrorExtensions, InputObject, SimpleObject, ID};
use chrono::{DateTime, NaiveDate, Utc};

use domain::models::disaster::{
    BulkUpdateItem, BulkUpdateOutcome, CreateDisasterRequest, Disaster, UpdateDisasterRequest,
};
use domain::GeoPoint;
use persistence::StoreError;
use shared::error::FieldError;

#[derive(SimpleObject)]
pub struct GqlGeoPoint {
    #[graphql(name = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl From<GeoPoint> for GqlGeoPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            kind: point.kind,
            coordinates: point.coordinates,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlDisaster {
    pub id: ID,
    #[graphql(name = "type")]
    pub kind: String,
    pub location: GqlGeoPoint,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Disaster> for GqlDisaster {
    fn from(d: Disaster) -> Self {
        Self {
            id: ID(d.id.to_string()),
            kind: d.kind,
            location: d.location.into(),
            date: d.date,
            description: d.description,
            status: d.status.as_str().to_string(),
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// One page of disasters plus the total count for the filter.
#[derive(SimpleObject)]
pub struct DisasterPage {
    pub data: Vec<GqlDisaster>,
    pub total: i64,
}

#[derive(SimpleObject)]
pub struct GqlBulkUpdateResult {
    pub matched_count: i64,
    pub modified_count: i64,
}

impl From<BulkUpdateOutcome> for GqlBulkUpdateResult {
    fn from(o: BulkUpdateOutcome) -> Self {
        Self {
            matched_count: o.matched_count,
            modified_count: o.modified_count,
        }
    }
}

#[derive(InputObject)]
pub struct GeoPointInput {
    #[graphql(name = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl From<GeoPointInput> for GeoPoint {
    fn from(input: GeoPointInput) -> Self {
        Self {
            kind: input.kind,
            coordinates: input.coordinates,
        }
    }
}

/// Create input; fields optional so validation reports every missing field
/// with the same messages as REST, instead of failing at parse time.
#[derive(InputObject)]
pub struct CreateDisasterInput {
    #[graphql(name = "type")]
    pub kind: Option<String>,
    pub location: Option<GeoPointInput>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl CreateDisasterInput {
    pub fn into_request(self) -> CreateDisasterRequest {
        CreateDisasterRequest {
            kind: self.kind,
            location: self.location.map(Into::into),
            date: self.date,
            description: self.description,
            status: self.status,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateDisasterInput {
    #[graphql(name = "type")]
    pub kind: Option<String>,
    pub location: Option<GeoPointInput>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateDisasterInput {
    pub fn into_request(self) -> UpdateDisasterRequest {
        UpdateDisasterRequest {
            kind: self.kind,
            location: self.location.map(Into::into),
            date: self.date,
            description: self.description,
            status: self.status,
        }
    }
}

#[derive(InputObject)]
pub struct BulkUpdateDisasterInput {
    pub id: Option<String>,
    #[graphql(name = "type")]
    pub kind: Option<String>,
    pub location: Option<GeoPointInput>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl BulkUpdateDisasterInput {
    pub fn into_item(self) -> BulkUpdateItem {
        BulkUpdateItem {
            id: self.id,
            update: UpdateDisasterRequest {
                kind: self.kind,
                location: self.location.map(Into::into),
                date: self.date,
                description: self.description,
                status: self.status,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Error helpers
// ---------------------------------------------------------------------------

pub fn validation_error(errors: Vec<FieldError>) -> Error {
    let message = match errors.as_slice() {
        [only] => only.message.clone(),
        many => format!("{} validation errors", many.len()),
    };
    let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    Error::new(message).extend_with(|_, e| {
        e.set("code", "BAD_USER_INPUT");
        e.set("details", details.clone());
    })
}

pub fn malformed_id_error() -> Error {
    Error::new("id must be a valid UUID").extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}

pub fn not_found_error() -> Error {
    Error::new("Disaster not found").extend_with(|_, e| e.set("code", "NOT_FOUND"))
}

pub fn store_error(err: StoreError) -> Error {
    match err {
        StoreError::Validation(msg) => {
            Error::new(msg).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
        }
        StoreError::Database(db) => {
            tracing::error!("Store error: {}", db);
            Error::new("An internal error occurred")
                .extend_with(|_, e| e.set("code", "INTERNAL_ERROR"))
        }
    }
}

/// Bulk write paths surface store failures as user input errors, matching
/// the REST 400 behavior.
pub fn bulk_store_error(err: StoreError) -> Error {
    Error::new(err.to_string()).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}
