//! Watermark job worker.
//!
//! This crate provides the single-shot job handler: payload intake, source
//! fetch, watermark compositing (via `vmark-media`), and result upload
//! (via `vmark-storage`).

pub mod config;
pub mod error;
pub mod fetch;
pub mod handler;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use handler::{run_job, WorkerContext};
