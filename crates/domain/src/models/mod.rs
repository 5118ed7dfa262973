//! Domain models for the Disaster API.

pub mod disaster;
pub mod geo;

pub use disaster::{Disaster, DisasterStatus};
pub use geo::GeoPoint;
