pub mod app;
pub mod config;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod negotiation;
pub mod routes;
pub mod wire;
