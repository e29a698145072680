//! Shared service plumbing for prdgen services.

pub mod config;
pub mod deadline;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
