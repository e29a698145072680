//! Test utilities for prdgen services.
//!
//! Provides `MockAuth` identity headers and a mock language-model completion server.
//! Import from `[dev-dependencies]` only, never in production code.

pub mod auth;
pub mod llm;
