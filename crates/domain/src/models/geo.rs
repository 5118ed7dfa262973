//! GeoJSON point type.

use serde::{Deserialize, Serialize};
use shared::error::FieldError;
use shared::validation::{validate_latitude, validate_longitude};

/// A GeoJSON-shaped geographic point: `{"type": "Point", "coordinates": [lng, lat]}`.
///
/// `coordinates` is a `Vec` rather than a fixed array so that arity errors
/// surface as field-level validation messages instead of deserialization
/// failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    pub const KIND: &'static str = "Point";

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: Self::KIND.to_string(),
            coordinates: vec![longitude, latitude],
        }
    }

    /// The `[0, 0]` fallback substituted when backend geometry cannot be
    /// reconstructed as a point.
    pub fn sentinel() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.first().copied().unwrap_or(0.0)
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.get(1).copied().unwrap_or(0.0)
    }

    /// Validates shape, finiteness, and coordinate bounds.
    ///
    /// Returns the first failed check as a `location`-qualified error; the
    /// message set is part of the API contract.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.kind != Self::KIND {
            return Err(FieldError::new(
                "location",
                "location must be a GeoJSON Point",
            ));
        }
        if self.coordinates.len() != 2 {
            return Err(FieldError::new(
                "location",
                "location coordinates must be [longitude, latitude]",
            ));
        }
        if !self.coordinates.iter().all(|c| c.is_finite()) {
            return Err(FieldError::new(
                "location",
                "location coordinates must be finite numbers",
            ));
        }
        if validate_longitude(self.longitude()).is_err() {
            return Err(FieldError::new(
                "location",
                "longitude must be between -180 and 180",
            ));
        }
        if validate_latitude(self.latitude()).is_err() {
            return Err(FieldError::new(
                "location",
                "latitude must be between -90 and 90",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_serialization() {
        let point = GeoPoint::new(-118.25, 34.05);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], -118.25);
        assert_eq!(json["coordinates"][1], 34.05);
    }

    #[test]
    fn test_geo_point_deserialization() {
        let point: GeoPoint =
            serde_json::from_str(r#"{"type":"Point","coordinates":[-74.0,40.7]}"#).unwrap();
        assert_eq!(point.longitude(), -74.0);
        assert_eq!(point.latitude(), 40.7);
        assert!(point.validate().is_ok());
    }

    #[test]
    fn test_geo_point_wrong_kind() {
        let point = GeoPoint {
            kind: "Polygon".to_string(),
            coordinates: vec![0.0, 0.0],
        };
        let err = point.validate().unwrap_err();
        assert_eq!(err.message, "location must be a GeoJSON Point");
    }

    #[test]
    fn test_geo_point_wrong_arity() {
        let point = GeoPoint {
            kind: "Point".to_string(),
            coordinates: vec![1.0, 2.0, 3.0],
        };
        let err = point.validate().unwrap_err();
        assert_eq!(
            err.message,
            "location coordinates must be [longitude, latitude]"
        );

        let point = GeoPoint {
            kind: "Point".to_string(),
            coordinates: vec![],
        };
        assert!(point.validate().is_err());
    }

    #[test]
    fn test_geo_point_non_finite() {
        let point = GeoPoint {
            kind: "Point".to_string(),
            coordinates: vec![f64::NAN, 0.0],
        };
        let err = point.validate().unwrap_err();
        assert_eq!(err.message, "location coordinates must be finite numbers");

        let point = GeoPoint {
            kind: "Point".to_string(),
            coordinates: vec![0.0, f64::INFINITY],
        };
        assert!(point.validate().is_err());
    }

    #[test]
    fn test_geo_point_out_of_bounds() {
        let err = GeoPoint::new(-200.0, 0.0).validate().unwrap_err();
        assert_eq!(err.message, "longitude must be between -180 and 180");

        let err = GeoPoint::new(0.0, 91.0).validate().unwrap_err();
        assert_eq!(err.message, "latitude must be between -90 and 90");
    }

    #[test]
    fn test_sentinel() {
        let point = GeoPoint::sentinel();
        assert_eq!(point.coordinates, vec![0.0, 0.0]);
        assert!(point.validate().is_ok());
    }
}
