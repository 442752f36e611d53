//! AWS-oriented adapters and the handler for Lambda layer builds.
//!
//! This crate owns runtime integration details (the Lambda entrypoint, the
//! pip subprocess adapter, and the storage/publish adapters) around the
//! contract and layout primitives in `layer_forge_core`.

pub mod adapters;
pub mod archive;
pub mod handlers;
