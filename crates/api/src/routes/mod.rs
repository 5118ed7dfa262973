//! Route handler modules.

pub mod disasters;
pub mod health;
