//! Disaster entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::disaster::{Disaster, DisasterStatus};

use crate::geometry::point_or_sentinel;

/// Database row mapping for the disasters table.
///
/// Coordinates arrive as nullable `ST_X`/`ST_Y` projections of the stored
/// geography; a row with an unreadable point still maps, via the sentinel.
#[derive(Debug, Clone, FromRow)]
pub struct DisasterEntity {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DisasterEntity> for Disaster {
    fn from(entity: DisasterEntity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            location: point_or_sentinel(entity.longitude, entity.latitude),
            date: entity.date,
            description: entity.description,
            // Unknown status strings fall back rather than failing the read.
            status: DisasterStatus::parse(&entity.status).unwrap_or_default(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entity() -> DisasterEntity {
        DisasterEntity {
            id: Uuid::new_v4(),
            kind: "wildfire".to_string(),
            latitude: Some(34.05),
            longitude: Some(-118.25),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: Some("Brush fire near the ridge".to_string()),
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = create_test_entity();
        let disaster: Disaster = entity.clone().into();

        assert_eq!(disaster.id, entity.id);
        assert_eq!(disaster.kind, "wildfire");
        assert_eq!(disaster.location.longitude(), -118.25);
        assert_eq!(disaster.location.latitude(), 34.05);
        assert_eq!(disaster.date, entity.date);
        assert_eq!(disaster.status, DisasterStatus::Active);
    }

    #[test]
    fn test_entity_missing_coordinates_maps_to_sentinel() {
        let mut entity = create_test_entity();
        entity.latitude = None;

        let disaster: Disaster = entity.into();
        assert_eq!(disaster.location.coordinates, vec![0.0, 0.0]);
    }

    #[test]
    fn test_entity_unknown_status_falls_back_to_active() {
        let mut entity = create_test_entity();
        entity.status = "archived".to_string();

        let disaster: Disaster = entity.into();
        assert_eq!(disaster.status, DisasterStatus::Active);
    }

    #[test]
    fn test_entity_status_variants() {
        let mut entity = create_test_entity();
        entity.status = "contained".to_string();
        let disaster: Disaster = entity.clone().into();
        assert_eq!(disaster.status, DisasterStatus::Contained);

        entity.status = "resolved".to_string();
        let disaster: Disaster = entity.into();
        assert_eq!(disaster.status, DisasterStatus::Resolved);
    }
}
