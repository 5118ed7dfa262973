//! Pure geospatial helpers for the disaster store.
//!
//! Everything here is side-effect free; the SQL that consumes these values
//! lives in the repository.

use domain::GeoPoint;
use geo::{point, HaversineDistance};

/// Converts a search radius in kilometers to the meters PostGIS expects.
pub fn radius_meters(distance_km: f64) -> f64 {
    distance_km * 1000.0
}

/// Whether a (lat, lng) pair is finite and within geographic bounds.
pub fn in_bounds(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

/// Reconstructs a point from the `ST_X`/`ST_Y` read columns.
///
/// A NULL coordinate means the stored geometry could not be read back as a
/// point; the row still serializes, with the `[0, 0]` sentinel standing in.
pub fn point_or_sentinel(longitude: Option<f64>, latitude: Option<f64>) -> GeoPoint {
    match (longitude, latitude) {
        (Some(lng), Some(lat)) => GeoPoint::new(lng, lat),
        _ => {
            tracing::warn!(
                longitude = ?longitude,
                latitude = ?latitude,
                "Stored geometry is not a readable point; substituting [0, 0]"
            );
            GeoPoint::sentinel()
        }
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Used by tests to cross-check proximity results; the production query path
/// relies on PostGIS `ST_Distance` over geography.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let pa = point!(x: a.longitude(), y: a.latitude());
    let pb = point!(x: b.longitude(), y: b.latitude());
    pa.haversine_distance(&pb) / 1000.0
}
