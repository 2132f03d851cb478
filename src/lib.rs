//! GenUI: a single-slot cache service for LLM-generated UI components.
//!
//! An external Generator produces an artifact pair (component source plus the
//! structured runtime-ops log that informed it) and writes it into the slot.
//! The crate provides:
//!
//! - [`store`]: durable single-slot persistence with atomic replace-on-write
//! - [`api`]: the read-only HTTP retrieval surface
//! - [`generator`]: the Generator contract and single-flight coordination
//! - [`config`]: file + env configuration for the slot location and server
//! - [`error`]: the crate-wide error taxonomy

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod store;

pub use error::{GenUiError, Result};
