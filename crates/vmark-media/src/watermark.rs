//! Watermark overlay compositing.
//!
//! Places a branded watermark image in the bottom-right corner of a video,
//! scaled relative to the video width with an edge margin.
//!
//! # Architecture
//!
//! - `WatermarkConfig`: overlay configuration (image path + geometry constants)
//! - `Placement`: computed scale and pixel offset for one video
//! - `overlay_watermark`: probe, compute, invoke FFmpeg

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use vmark_models::EncodingConfig;

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_video;

/// Default watermark asset path in the production container.
pub const DEFAULT_WATERMARK_PATH: &str = "/app/assets/watermark.png";

/// Watermark source image width in pixels.
pub const WATERMARK_SOURCE_WIDTH: u32 = 1142;
/// Watermark source image height in pixels.
pub const WATERMARK_SOURCE_HEIGHT: u32 = 408;
/// Watermark width as a fraction of the video width.
pub const WATERMARK_SCALE: f64 = 0.3;
/// Edge padding as a fraction of the video width, applied on both axes.
pub const WATERMARK_MARGIN: f64 = 0.015;

/// Configuration for the watermark overlay.
///
/// The production values are fixed constants; the struct exists so tests and
/// alternative deployments can substitute them:
/// ```ignore
/// let config = WatermarkConfig::default().with_image_path("./assets/watermark.png");
/// ```
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    /// Path to the watermark image (PNG with transparency)
    pub image_path: PathBuf,
    /// Source image width in pixels
    pub source_width: u32,
    /// Source image height in pixels
    pub source_height: u32,
    /// Watermark width as a fraction of the video width
    pub scale: f64,
    /// Edge padding as a fraction of the video width
    pub margin: f64,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_WATERMARK_PATH),
            source_width: WATERMARK_SOURCE_WIDTH,
            source_height: WATERMARK_SOURCE_HEIGHT,
            scale: WATERMARK_SCALE,
            margin: WATERMARK_MARGIN,
        }
    }
}

impl WatermarkConfig {
    /// Create a config with a custom image path.
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = path.into();
        self
    }

    /// Aspect ratio of the source watermark image.
    pub fn aspect_ratio(&self) -> f64 {
        self.source_width as f64 / self.source_height as f64
    }

    /// Validate that the watermark image exists.
    pub fn validate(&self) -> MediaResult<()> {
        if !self.image_path.exists() {
            return Err(MediaError::InvalidVideo(format!(
                "Watermark image not found: {}",
                self.image_path.display()
            )));
        }
        Ok(())
    }
}

/// Computed watermark scale and position for one video.
///
/// Truncation happens exactly where the coordinates become pixels: the scaled
/// width, and the final x/y offsets. The scaled height stays real-valued for
/// the offset calculation and is truncated separately for the scale filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Watermark width after scaling, in pixels
    pub scaled_width: u32,
    /// Watermark height after scaling, truncated, in pixels
    pub scaled_height: u32,
    /// Top-left x offset of the overlay
    pub x: i64,
    /// Top-left y offset of the overlay
    pub y: i64,
}

impl Placement {
    /// Compute bottom-right placement with margin for a video of the given
    /// dimensions. Pure function of its inputs.
    pub fn compute(video_width: u32, video_height: u32, config: &WatermarkConfig) -> Self {
        let aspect_ratio = config.aspect_ratio();

        let scaled_width = (config.scale * video_width as f64) as u32;
        let scaled_height = scaled_width as f64 / aspect_ratio;
        let margin = config.margin * video_width as f64;

        let x = (video_width as f64 - scaled_width as f64 - margin) as i64;
        let y = (video_height as f64 - scaled_height - margin) as i64;

        Self {
            scaled_width,
            scaled_height: scaled_height as u32,
            x,
            y,
        }
    }

    /// Build the FFmpeg filter graph: scale the image input, overlay it onto
    /// the video stream at the computed offset.
    pub fn overlay_filter(&self) -> String {
        format!(
            "[1:v]scale={}:{}[wm];[0:v][wm]overlay={}:{}",
            self.scaled_width, self.scaled_height, self.x, self.y
        )
    }
}

/// Composite the watermark onto a video.
///
/// Writes the result to `output` (overwriting it if present) with the video
/// track re-encoded per `encoding` and the audio track re-encoded to the
/// configured audio codec, content otherwise unchanged. Blocks until the
/// FFmpeg process exits.
///
/// # Errors
/// - `FileNotFound` / `InvalidVideo` if the input cannot be probed; no
///   output file is created in that case
/// - `FfmpegFailed` with captured stderr if the transcode fails
pub async fn overlay_watermark(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &WatermarkConfig,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    config.validate()?;

    let video = probe_video(input).await?;
    let placement = Placement::compute(video.width, video.height, config);

    info!(
        input = %input.display(),
        output = %output.display(),
        video_width = video.width,
        video_height = video.height,
        x = placement.x,
        y = placement.y,
        "Applying watermark overlay"
    );
    debug!(filter = %placement.overlay_filter(), codec = %encoding.codec, "Overlay filter graph");

    let mut cmd = FfmpegCommand::new(input, output)
        .second_input(&config.image_path)
        .filter_complex(placement.overlay_filter())
        .output_args(encoding.to_ffmpeg_args());

    if encoding.use_nvenc {
        cmd = cmd.input_args(["-hwaccel", "cuda"]);
    }

    cmd.run().await?;

    info!(output = %output.display(), "Watermark applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_boundary_case() {
        // 1000x562: scaled width 300, margin 15, height 300/(1142/408) = 107.18
        let config = WatermarkConfig::default();
        let p = Placement::compute(1000, 562, &config);

        assert_eq!(p.scaled_width, 300);
        assert_eq!(p.scaled_height, 107);
        assert_eq!(p.x, 685);
        // y truncates from the real-valued height: 562 - 107.18 - 15 = 439.82
        assert_eq!(p.y, 439);
    }

    #[test]
    fn test_placement_deterministic() {
        let config = WatermarkConfig::default();
        let a = Placement::compute(1920, 1080, &config);
        let b = Placement::compute(1920, 1080, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let config = WatermarkConfig::default();
        let source_ratio = 1142.0 / 408.0;

        for width in [640u32, 1000, 1280, 1920, 3840] {
            let p = Placement::compute(width, width * 9 / 16, &config);
            let ratio = p.scaled_width as f64 / p.scaled_height as f64;
            // Truncating the height can shift the ratio by up to one pixel
            assert!(
                (ratio - source_ratio).abs() < 0.03,
                "width {}: ratio {} vs {}",
                width,
                ratio,
                source_ratio
            );
        }
    }

    #[test]
    fn test_bottom_right_anchoring() {
        let config = WatermarkConfig::default();

        for (w, h) in [(640u32, 360u32), (1280, 720), (1920, 1080), (3840, 2160)] {
            let p = Placement::compute(w, h, &config);
            assert!(p.x + p.scaled_width as i64 <= w as i64, "{}x{}", w, h);
            assert!(p.y + p.scaled_height as i64 <= h as i64, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_overlay_filter_format() {
        let config = WatermarkConfig::default();
        let p = Placement::compute(1000, 562, &config);
        assert_eq!(
            p.overlay_filter(),
            "[1:v]scale=300:107[wm];[0:v][wm]overlay=685:439"
        );
    }

    #[test]
    fn test_validate_missing_image() {
        let config = WatermarkConfig::default().with_image_path("/nonexistent/watermark.png");
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_overlay_missing_input_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let wm = dir.path().join("watermark.png");
        std::fs::write(&wm, b"png").unwrap();

        let input = dir.path().join("missing.mp4");
        let output = dir.path().join("out.mp4");
        let config = WatermarkConfig::default().with_image_path(&wm);

        let err = overlay_watermark(&input, &output, &config, &EncodingConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::FileNotFound(_)));
        assert!(!output.exists());
    }
}
