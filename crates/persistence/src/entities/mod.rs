//! Entity definitions (database row mappings).

pub mod disaster;

pub use disaster::DisasterEntity;
