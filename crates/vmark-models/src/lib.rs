//! Shared data models for the VMark backend.
//!
//! This crate provides Serde-serializable types for:
//! - Watermark jobs and job identifiers
//! - Encoding configuration

pub mod encoding;
pub mod job;

// Re-export common types
pub use encoding::EncodingConfig;
pub use job::{JobId, WatermarkJob};
