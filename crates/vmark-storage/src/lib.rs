//! S3-compatible object storage client.
//!
//! This crate provides:
//! - File upload to any S3-compatible endpoint
//! - Presigned URL generation
//! - Job output key layout

pub mod client;
pub mod error;
pub mod operations;

pub use client::{S3Client, S3Config};
pub use error::{StorageError, StorageResult};
