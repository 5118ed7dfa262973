//! Domain layer for the Disaster API backend.
//!
//! This crate contains:
//! - The Disaster domain model and its status enum
//! - The GeoJSON point type used at serialization boundaries
//! - Request shapes and their normalization (the validation layer)

pub mod models;

pub use models::disaster::{Disaster, DisasterStatus};
pub use models::geo::GeoPoint;
