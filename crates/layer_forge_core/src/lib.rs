//! Shared layer-build domain primitives.
//!
//! This crate owns the build request contract and the staging-directory
//! layout required by Lambda layers. It intentionally excludes AWS SDK,
//! Lambda runtime, and filesystem concerns.

pub mod contract;
pub mod layout;
