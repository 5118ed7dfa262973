//! Disaster domain model, request shapes, and their normalization.
//!
//! Raw request types carry `Option` fields; `normalize()` converts them into
//! typed values or a list of field-qualified errors. The error messages are
//! a stable API contract (see `shared::error::FieldError`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::error::FieldError;
use shared::validation::{parse_coordinate, parse_event_date, validate_distance_km};

use super::geo::GeoPoint;

/// Maximum number of items accepted by either bulk endpoint.
pub const MAX_BULK_ITEMS: usize = 100;

/// Represents a disaster record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: GeoPoint,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: DisasterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Disaster lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisasterStatus {
    Active,
    Contained,
    Resolved,
}

impl DisasterStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterStatus::Active => "active",
            DisasterStatus::Contained => "contained",
            DisasterStatus::Resolved => "resolved",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(DisasterStatus::Active),
            "contained" => Some(DisasterStatus::Contained),
            "resolved" => Some(DisasterStatus::Resolved),
            _ => None,
        }
    }
}

impl Default for DisasterStatus {
    fn default() -> Self {
        DisasterStatus::Active
    }
}

/// Fully validated create payload, ready for the store.
#[derive(Debug, Clone)]
pub struct NewDisaster {
    pub kind: String,
    pub location: GeoPoint,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: DisasterStatus,
}

/// Fully validated partial-update payload. Absent fields are left untouched
/// by the store (merge semantics).
#[derive(Debug, Clone, Default)]
pub struct DisasterPatch {
    pub kind: Option<String>,
    pub location: Option<GeoPoint>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<DisasterStatus>,
}

impl DisasterPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }
}

/// Exact-match / date-range filter shared by `list` and `count`.
#[derive(Debug, Clone, Default)]
pub struct DisasterFilter {
    pub kind: Option<String>,
    pub status: Option<DisasterStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Validated proximity-search parameters (distance in kilometers).
#[derive(Debug, Clone, Copy)]
pub struct NearParams {
    pub lat: f64,
    pub lng: f64,
    pub distance_km: f64,
}

/// Outcome of a bulk update: requests attempted vs rows actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkUpdateOutcome {
    pub matched_count: i64,
    pub modified_count: i64,
}

// ---------------------------------------------------------------------------
// Raw request shapes
// ---------------------------------------------------------------------------

/// Request payload for creating a disaster.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisasterRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<GeoPoint>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl CreateDisasterRequest {
    /// Validates the payload and produces a typed [`NewDisaster`].
    ///
    /// All fields are checked so a single round trip reports every problem.
    pub fn normalize(&self) -> Result<NewDisaster, Vec<FieldError>> {
        let mut errors = Vec::new();

        let kind = match &self.kind {
            None => {
                errors.push(FieldError::new("type", "type (string) is required"));
                None
            }
            Some(k) if k.trim().is_empty() => {
                errors.push(FieldError::new("type", "type must be a non-empty string"));
                None
            }
            Some(k) => Some(k.trim().to_string()),
        };

        let location = match &self.location {
            None => {
                errors.push(FieldError::new("location", "location (Point) is required"));
                None
            }
            Some(point) => match point.validate() {
                Ok(()) => Some(point.clone()),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        let date = match &self.date {
            None => {
                errors.push(FieldError::new("date", "date (YYYY-MM-DD) is required"));
                None
            }
            Some(raw) => match parse_event_date(raw) {
                Some(d) => Some(d),
                None => {
                    errors.push(FieldError::new("date", "date must be a valid date"));
                    None
                }
            },
        };

        let status = match &self.status {
            None => {
                errors.push(FieldError::new(
                    "status",
                    "status (active|contained|resolved) is required",
                ));
                None
            }
            Some(raw) => match DisasterStatus::parse(raw) {
                Some(s) => Some(s),
                None => {
                    errors.push(FieldError::new(
                        "status",
                        "status must be one of active, contained, resolved",
                    ));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // All unwraps guarded by the empty-errors check above.
        Ok(NewDisaster {
            kind: kind.unwrap(),
            location: location.unwrap(),
            date: date.unwrap(),
            description: self.description.clone(),
            status: status.unwrap(),
        })
    }
}

/// Request payload for a partial update. All fields optional, but at least
/// one must be present; any present field follows the create rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisasterRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<GeoPoint>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateDisasterRequest {
    pub fn normalize(&self) -> Result<DisasterPatch, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut patch = DisasterPatch::default();

        match &self.kind {
            None => {}
            Some(k) if k.trim().is_empty() => {
                errors.push(FieldError::new("type", "type must be a non-empty string"));
            }
            Some(k) => patch.kind = Some(k.trim().to_string()),
        }

        if let Some(point) = &self.location {
            match point.validate() {
                Ok(()) => patch.location = Some(point.clone()),
                Err(e) => errors.push(e),
            }
        }

        if let Some(raw) = &self.date {
            match parse_event_date(raw) {
                Some(d) => patch.date = Some(d),
                None => errors.push(FieldError::new("date", "date must be a valid date")),
            }
        }

        patch.description = self.description.clone();

        if let Some(raw) = &self.status {
            match DisasterStatus::parse(raw) {
                Some(s) => patch.status = Some(s),
                None => errors.push(FieldError::new(
                    "status",
                    "status must be one of active, contained, resolved",
                )),
            }
        }

        if errors.is_empty() && patch.is_empty() {
            errors.push(FieldError::new("body", "at least one field is required"));
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

/// One item of a bulk update request: an id plus a partial update.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateItem {
    pub id: Option<String>,
    #[serde(flatten)]
    pub update: UpdateDisasterRequest,
}

impl BulkUpdateItem {
    pub fn normalize(&self) -> Result<(Uuid, DisasterPatch), Vec<FieldError>> {
        let mut errors = Vec::new();

        let id = match &self.id {
            None => {
                errors.push(FieldError::new("id", "id (UUID) is required"));
                None
            }
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("id", "id must be a valid UUID"));
                    None
                }
            },
        };

        let patch = match self.update.normalize() {
            Ok(p) => Some(p),
            Err(mut e) => {
                errors.append(&mut e);
                None
            }
        };

        if errors.is_empty() {
            Ok((id.unwrap(), patch.unwrap()))
        } else {
            Err(errors)
        }
    }
}

/// Validates a bulk-create body: 1..=100 items, each create-shaped.
///
/// All-or-nothing: any failing item rejects the whole batch, with errors
/// indexed as `items[N].field`.
pub fn normalize_bulk_create(
    items: &[CreateDisasterRequest],
) -> Result<Vec<NewDisaster>, Vec<FieldError>> {
    if let Err(e) = check_bulk_len(items.len()) {
        return Err(vec![e]);
    }

    let mut errors = Vec::new();
    let mut normalized = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.normalize() {
            Ok(n) => normalized.push(n),
            Err(item_errors) => {
                errors.extend(item_errors.into_iter().map(|e| e.at_index(index)));
            }
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

/// Validates a bulk-update body: 1..=100 items, each `{id, ...partial}`.
///
/// Malformed ids or field values fail the whole request; existence of the
/// ids is checked later, by the store.
pub fn normalize_bulk_update(
    items: &[BulkUpdateItem],
) -> Result<Vec<(Uuid, DisasterPatch)>, Vec<FieldError>> {
    if let Err(e) = check_bulk_len(items.len()) {
        return Err(vec![e]);
    }

    let mut errors = Vec::new();
    let mut normalized = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.normalize() {
            Ok(pair) => normalized.push(pair),
            Err(item_errors) => {
                errors.extend(item_errors.into_iter().map(|e| e.at_index(index)));
            }
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

fn check_bulk_len(len: usize) -> Result<(), FieldError> {
    if len == 0 || len > MAX_BULK_ITEMS {
        Err(FieldError::new(
            "items",
            "items must contain between 1 and 100 entries",
        ))
    } else {
        Ok(())
    }
}

/// Raw proximity-search query parameters, as strings straight from the URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub distance: Option<String>,
}

impl NearQuery {
    pub fn normalize(&self) -> Result<NearParams, Vec<FieldError>> {
        let mut errors = Vec::new();

        let lat = self
            .lat
            .as_deref()
            .and_then(parse_coordinate)
            .filter(|v| (-90.0..=90.0).contains(v));
        if lat.is_none() {
            errors.push(FieldError::new(
                "lat",
                "lat must be a number between -90 and 90",
            ));
        }

        let lng = self
            .lng
            .as_deref()
            .and_then(parse_coordinate)
            .filter(|v| (-180.0..=180.0).contains(v));
        if lng.is_none() {
            errors.push(FieldError::new(
                "lng",
                "lng must be a number between -180 and 180",
            ));
        }

        let distance = self
            .distance
            .as_deref()
            .and_then(parse_coordinate)
            .filter(|v| validate_distance_km(*v).is_ok());
        if distance.is_none() {
            errors.push(FieldError::new(
                "distance",
                "distance must be a non-negative number",
            ));
        }

        match (lat, lng, distance) {
            (Some(lat), Some(lng), Some(distance_km)) => Ok(NearParams {
                lat,
                lng,
                distance_km,
            }),
            _ => Err(errors),
        }
    }
}

/// Accepts a value as either a number or a numeric string; anything
/// unparseable becomes `None` so pagination falls back to its defaults
/// instead of failing the request at deserialization.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(v)) => Some(v),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Raw list query parameters. `page` and `limit` arrive as strings from the
/// URL and coerce leniently; the filter fields validate strictly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDisastersQuery {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ListDisastersQuery {
    pub fn filter(&self) -> Result<DisasterFilter, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut filter = DisasterFilter {
            kind: self.kind.clone().filter(|k| !k.trim().is_empty()),
            ..Default::default()
        };

        if let Some(raw) = &self.status {
            match DisasterStatus::parse(raw) {
                Some(s) => filter.status = Some(s),
                None => errors.push(FieldError::new(
                    "status",
                    "status must be one of active, contained, resolved",
                )),
            }
        }

        if let Some(raw) = &self.date_from {
            match parse_event_date(raw) {
                Some(d) => filter.date_from = Some(d),
                None => errors.push(FieldError::new("dateFrom", "dateFrom must be a valid date")),
            }
        }

        if let Some(raw) = &self.date_to {
            match parse_event_date(raw) {
                Some(d) => filter.date_to = Some(d),
                None => errors.push(FieldError::new("dateTo", "dateTo must be a valid date")),
            }
        }

        if errors.is_empty() {
            Ok(filter)
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Response payload for single-disaster operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: GeoPoint,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: DisasterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Disaster> for DisasterResponse {
    fn from(d: Disaster) -> Self {
        Self {
            id: d.id,
            kind: d.kind,
            location: d.location,
            date: d.date,
            description: d.description,
            status: d.status,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Response for listing disasters.
#[derive(Debug, Clone, Serialize)]
pub struct ListDisastersResponse {
    pub data: Vec<DisasterResponse>,
}

/// Response for bulk updates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResponse {
    pub matched_count: i64,
    pub modified_count: i64,
}

impl From<BulkUpdateOutcome> for BulkUpdateResponse {
    fn from(o: BulkUpdateOutcome) -> Self {
        Self {
            matched_count: o.matched_count,
            modified_count: o.modified_count,
        }
    }
}
