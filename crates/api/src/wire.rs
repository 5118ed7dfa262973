//! Protobuf wire messages for the binary representation.
//!
//! The messages are hand-derived with prost rather than generated from a
//! .proto file, keeping the build free of a protoc dependency. Field tags
//! are part of the wire contract; never renumber them.
//!
//! `location` travels as a string-encoded GeoJSON document inside the
//! message, not as nested fields. Consumers parse it back into a point.

use domain::models::disaster::{BulkUpdateOutcome, Disaster as DomainDisaster};

#[derive(Clone, PartialEq, prost::Message)]
pub struct Disaster {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub r#type: String,
    /// GeoJSON Point document, JSON-encoded.
    #[prost(string, tag = "3")]
    pub location: String,
    /// `YYYY-MM-DD`.
    #[prost(string, tag = "4")]
    pub date: String,
    #[prost(string, optional, tag = "5")]
    pub description: Option<String>,
    #[prost(string, tag = "6")]
    pub status: String,
    /// RFC 3339 timestamps.
    #[prost(string, tag = "7")]
    pub created_at: String,
    #[prost(string, tag = "8")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DisasterList {
    #[prost(message, repeated, tag = "1")]
    pub data: Vec<Disaster>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BulkUpdateResult {
    #[prost(int64, tag = "1")]
    pub matched_count: i64,
    #[prost(int64, tag = "2")]
    pub modified_count: i64,
}

/// Explicit empty message, sent in place of an empty body on delete.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}

impl From<&DomainDisaster> for Disaster {
    fn from(d: &DomainDisaster) -> Self {
        Self {
            id: d.id.to_string(),
            r#type: d.kind.clone(),
            location: serde_json::to_string(&d.location).unwrap_or_default(),
            date: d.date.format("%Y-%m-%d").to_string(),
            description: d.description.clone(),
            status: d.status.as_str().to_string(),
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
        }
    }
}

impl From<&BulkUpdateOutcome> for BulkUpdateResult {
    fn from(o: &BulkUpdateOutcome) -> Self {
        Self {
            matched_count: o.matched_count,
            modified_count: o.modified_count,
        }
    }
}

/// Wraps a slice of domain records into the list message.
pub fn disaster_list(items: &[DomainDisaster]) -> DisasterList {
    DisasterList {
        data: items.iter().map(Into::into).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use domain::models::disaster::DisasterStatus;
    use domain::GeoPoint;
    use prost::Message;
    use uuid::Uuid;

    fn sample() -> DomainDisaster {
        DomainDisaster {
            id: Uuid::new_v4(),
            kind: "wildfire".to_string(),
            location: GeoPoint::new(-118.25, 34.05),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: Some("Brush fire near the ridge".to_string()),
            status: DisasterStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_wire_values_match_domain() {
        let domain = sample();
        let wire = Disaster::from(&domain);

        assert_eq!(wire.id, domain.id.to_string());
        assert_eq!(wire.r#type, "wildfire");
        assert_eq!(wire.date, "2025-01-01");
        assert_eq!(wire.status, "active");
        assert_eq!(wire.description.as_deref(), Some("Brush fire near the ridge"));
    }

    #[test]
    fn test_location_string_parses_back_to_the_same_point() {
        let domain = sample();
        let wire = Disaster::from(&domain);

        let point: GeoPoint = serde_json::from_str(&wire.location).unwrap();
        assert_eq!(point, domain.location);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let wire = Disaster::from(&sample());

        let mut buf = Vec::new();
        wire.encode(&mut buf).unwrap();
        let decoded = Disaster::decode(buf.as_slice()).unwrap();
        assert_eq!(decoded, wire);
    }

    #[test]
    fn test_disaster_list_wraps_items() {
        let items = vec![sample(), sample()];
        let list = disaster_list(&items);
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].r#type, "wildfire");
    }

    #[test]
    fn test_bulk_update_result_conversion() {
        let outcome = BulkUpdateOutcome {
            matched_count: 5,
            modified_count: 3,
        };
        let wire = BulkUpdateResult::from(&outcome);
        assert_eq!(wire.matched_count, 5);
        assert_eq!(wire.modified_count, 3);
    }

    #[test]
    fn test_empty_message_encodes_to_zero_bytes() {
        let empty = Empty {};
        let mut buf = Vec::new();
        empty.encode(&mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
