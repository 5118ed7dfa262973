//! Persistence layer for the Disaster API backend.
//!
//! This crate contains:
//! - Database connection management
//! - The `DisasterStore` trait and its PostGIS-backed implementation
//! - Entity definitions (database row mappings)
//! - Pure geospatial query helpers

pub mod db;
pub mod entities;
pub mod geometry;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use store::{DisasterStore, ListParams, StoreError};
