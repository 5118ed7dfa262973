//! Shared utilities and common types for the Disaster API backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Coordinate and date validation primitives
//! - The field-qualified validation error type
//! - Offset pagination clamping

pub mod error;
pub mod pagination;
pub mod validation;
