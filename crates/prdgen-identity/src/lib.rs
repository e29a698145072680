//! Caller identity for prdgen services.
//!
//! Provides the `Identity` extractor for the gateway-injected owner header.

pub mod identity;

pub use identity::{IDENTITY_HEADER, Identity};
