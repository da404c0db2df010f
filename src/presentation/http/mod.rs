//! Ops HTTP Surface
//!
//! Health probes and Prometheus metrics.

pub mod health;
pub mod routes;

pub use routes::{create_router, OpsState};
