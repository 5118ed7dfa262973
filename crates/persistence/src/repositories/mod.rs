//! Repository implementations.

pub mod disaster;

pub use disaster::DisasterRepository;
