//! FFmpeg CLI wrapper for watermark compositing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Video stream probing via ffprobe
//! - Watermark placement geometry and overlay compositing

pub mod command;
pub mod error;
pub mod probe;
pub mod watermark;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_video, VideoInfo};
pub use watermark::{
    overlay_watermark, Placement, WatermarkConfig, DEFAULT_WATERMARK_PATH, WATERMARK_MARGIN,
    WATERMARK_SCALE, WATERMARK_SOURCE_HEIGHT, WATERMARK_SOURCE_WIDTH,
};
