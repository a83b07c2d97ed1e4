//! service-core: Shared infrastructure for the benefits portal services.
pub mod error;
pub mod middleware;
pub mod observability;
