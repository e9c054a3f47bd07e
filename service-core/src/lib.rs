//! service-core: Shared infrastructure for the customer microservice.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use mongodb;
pub use tracing;
